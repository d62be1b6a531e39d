//! CLI demo entry point.
//!
//! # Responsibility
//! - Walk through the user/note/comment lifecycle against `notes_core`.
//! - Print each step and the resulting registry state to stdout.
//!
//! Configuration comes from `NOTES_*` environment variables, see
//! `notes_core::CoreConfig::from_env`.

use log::error;
use notes_core::{init_logging, CoreConfig, NoteService, UserService};
use std::error::Error;
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=cli_run module=cli status=error error={err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let config = CoreConfig::from_env()?;
    init_logging(&config)?;

    let mut users = UserService::new();
    let mut notes = NoteService::new().with_default_sort(config.default_sort);

    println!("notes_core version={}", notes_core::core_version());

    section("Registering users");
    users.register("Alex", Some("Bobrikov".to_string()));
    users.register("Mark", Some("Twain".to_string()));
    users.register("Tom", Some("Sawyer".to_string()));
    for user in users.users() {
        println!("{} {}", user.id, user.display_name());
    }

    section("Creating notes");
    println!("{}", notes.add("Test(1) - heading", "Test note 1", 1));
    println!("{}", notes.add("Test(2) - heading", "Test note 2", 2));
    println!("{}", notes.add("Test(3) - heading", "Test note 3", 1));
    println!("{}", notes.add("Test(4) - heading", "Test note 4", 1));
    print_state(&notes)?;

    section("Note by id");
    println!("{}", serde_json::to_string_pretty(notes.get_by_id(2)?)?);

    section("Notes owned by user");
    let owner = users.get_by_id(1)?;
    println!("owner={}", owner.display_name());
    println!(
        "{}",
        serde_json::to_string_pretty(&notes.list_by_owner(owner.id, None))?
    );

    section("Deleting note");
    notes.delete(1)?;
    print_state(&notes)?;

    section("Editing note");
    notes.edit(2, "Test(2) - edited heading", "Edited test note 2")?;
    print_state(&notes)?;

    section("Creating comments");
    notes.create_comment(2, 1, "First comment")?;
    notes.create_comment(2, 3, "Second comment")?;
    print_state(&notes)?;

    section("Comments of note");
    println!(
        "{}",
        serde_json::to_string_pretty(&notes.list_comments(2, None)?)?
    );

    section("Editing comment");
    notes.edit_comment(2, 3, "Second comment, edited")?;
    print_state(&notes)?;

    section("Deleting comment");
    notes.delete_comment(1, 1)?;
    print_state(&notes)?;

    section("Restoring comment");
    notes.restore_comment(1, 1)?;
    print_state(&notes)?;

    Ok(())
}

fn section(title: &str) {
    println!("\n== {title}");
}

fn print_state(notes: &NoteService) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(&notes.dump())?);
    Ok(())
}
