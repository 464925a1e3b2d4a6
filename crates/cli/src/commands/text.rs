use anyhow::Result;
use quiz_helper_core::normalize;
use quiz_helper_core::similarity::similarity;

/// Print the normalized form of `text`.
pub fn normalize_command(text: &str) -> Result<()> {
    println!("{}", normalize(text));
    Ok(())
}

/// Print the similarity ratio between two strings.
pub fn similarity_command(a: &str, b: &str) -> Result<()> {
    println!("{:.4}", similarity(a, b));
    Ok(())
}
