//! Last-resort interactive capture of the three fields.
//!
//! The orchestrator never talks to the terminal directly; it goes
//! through [`FieldSource`] so tests can substitute a deterministic
//! implementation for [`TerminalPrompter`].

use std::io::{self, BufRead, Write};

/// Source of operator-supplied values.
pub trait FieldSource {
    /// Ask for the Firefox profile directory holding the extension store.
    fn supply_profile_path(&mut self) -> io::Result<String>;

    /// Ask for the three fields, returned as (email, key hash, iteration
    /// text). Whatever the operator types is accepted verbatim — this is
    /// the terminal strategy and constructing a correct record is the
    /// operator's responsibility.
    fn supply_three_fields(&mut self) -> io::Result<(String, String, String)>;
}

/// Interactive prompts on the controlling terminal.
pub struct TerminalPrompter;

impl FieldSource for TerminalPrompter {
    fn supply_profile_path(&mut self) -> io::Result<String> {
        println!("It seems that you're using Firefox, please enter the extension storage path");
        if cfg!(windows) {
            println!(
                "by default, it looks like this: %AppData%\\Mozilla\\Firefox\\Profiles\\[your_profile]\\storage\\default\\moz-extension+++[UUID]^userContextId=[integer]"
            );
        } else {
            println!(
                "by default, it looks like this: ~/.mozilla/firefox/your_profile/storage/default/moz-extension+++[UUID]^userContextId=[integer]"
            );
        }
        println!("The UUID can be found by visiting about:debugging#/runtime/this-firefox");
        prompt("Please enter path (replace \\ with / or with \\\\): ")
    }

    fn supply_three_fields(&mut self) -> io::Result<(String, String, String)> {
        print_inspection_instructions();
        let key_hash = prompt("search for the value of the \"keyHash\" key and enter it here: ")?;
        let iterations =
            prompt("search for the value of the \"kdfIterations\" key and enter it here: ")?;
        let email = prompt("search for the value of the \"userEmail\" key and enter it here: ")?;
        Ok((email, key_hash, iterations))
    }
}

/// Walk the operator through reading the extension storage by hand.
fn print_inspection_instructions() {
    println!("automatic data extraction failed");
    println!("here are the manual steps\n");
    println!("Firefox: navigate to about:debugging#/runtime/this-firefox");
    println!("click \"inspect\" at the Bitwarden entry");
    println!("click \"extension storage\" in the storage tab");
    println!();
    println!("Chrome: navigate to chrome://extensions/");
    println!("turn the developer mode on");
    println!("click \"Inspect views background.html\" at the Bitwarden entry");
    println!("open the console tab");
    println!(
        "enter \" chrome.storage.local.get(null, function (data) {{ console.info(data) }}); \""
    );
    println!();
    println!(
        "those instructions apply to all chromium based browsers such as Vivaldi, Opera, Brave and the new Edge"
    );
    println!("\n");
}

fn prompt(label: &str) -> io::Result<String> {
    print!("{label}");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_owned())
}
