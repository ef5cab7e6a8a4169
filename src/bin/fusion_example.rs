//! Three-qubit GHZ resource fused with two single-qubit measurements.

use fusion_stabilizer::utils::logger;
use fusion_stabilizer::{pretty, update_resource_with_fusions, Outcomes, PauliString, Sign, Stabilizer};

fn main() -> anyhow::Result<()> {
    logger::init_cli_logger(false);

    let resource = ["+XXX", "+ZZI", "+IZZ"]
        .iter()
        .map(|g| g.parse::<Stabilizer>())
        .collect::<Result<Vec<_>, _>>()?;
    let fusions = ["XII", "IZI"]
        .iter()
        .map(|m| m.parse::<PauliString>())
        .collect::<Result<Vec<_>, _>>()?;
    let outcomes: Outcomes = [(fusions[0].clone(), Sign::Plus), (fusions[1].clone(), Sign::Minus)]
        .into_iter()
        .collect();

    println!("Initial resource generators:");
    for g in &resource {
        println!("   {}", pretty(g));
    }

    let updated = update_resource_with_fusions(&resource, &fusions, &outcomes)?;

    println!("\nAfter fusion measurements:");
    for g in &updated.generators {
        println!("   {}", pretty(g));
    }

    Ok(())
}
