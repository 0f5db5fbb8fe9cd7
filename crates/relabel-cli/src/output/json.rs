use relabel_core::error::RelabelError;
use relabel_core::outcome::ProcessingResult;

pub fn print(result: &ProcessingResult) -> Result<(), RelabelError> {
    let json = serde_json::to_string_pretty(result)?;
    println!("{json}");
    Ok(())
}
