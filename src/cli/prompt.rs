use std::io::{self, Write};

use crate::{types::DuplicatePolicy, warning};

/// Prints `question` and reads one trimmed line from stdin. A closed stdin
/// reads as an empty answer.
pub fn ask(question: &str) -> String {
    print!("{} ", question);
    let _ = io::stdout().flush();

    let mut answer = String::new();
    if io::stdin().read_line(&mut answer).is_err() {
        return String::new();
    }
    answer.trim().to_string()
}

/// Yes/no question; only `y` and `yes` count as consent.
pub fn confirm(question: &str) -> bool {
    matches!(
        ask(&format!("{} (yes/no):", question))
            .to_lowercase()
            .as_str(),
        "y" | "yes"
    )
}

pub fn duplicate_policy(existing: &[String]) -> DuplicatePolicy {
    warning!("The following playlists already exist on Tidal:");
    for name in existing {
        println!("    - {}", name);
    }
    println!();
    println!("Do you want to:");
    println!("1. Skip existing playlists");
    println!("2. Create duplicates (will have the same name)");
    println!("3. Cancel");

    match ask("Enter your choice (1/2/3):").as_str() {
        "1" => DuplicatePolicy::Skip,
        "2" => DuplicatePolicy::Duplicate,
        _ => DuplicatePolicy::Cancel,
    }
}
