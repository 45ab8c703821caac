pub mod snapshot_server;
