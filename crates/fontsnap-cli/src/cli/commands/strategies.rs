//! `fontsnap strategies` – show the naming strategies in table order.

use fontsnap_core::strategy::{Eligibility, StrategyTable};

pub fn run_strategies(name: Option<&str>) {
    let table = StrategyTable::standard();
    for (i, s) in table.iter().enumerate() {
        let when = match s.eligibility {
            Eligibility::Always => "always".to_string(),
            Eligibility::RequiresMarker(m) => format!("if name contains '{}'", m),
        };
        match name {
            Some(name) if s.is_eligible(name) => {
                println!("{:>2}  {:<40} {}", i + 1, s.name, s.candidate(name))
            }
            Some(_) => println!("{:>2}  {:<40} (skipped: {})", i + 1, s.name, when),
            None => println!("{:>2}  {:<40} {}", i + 1, s.name, when),
        }
    }
}
