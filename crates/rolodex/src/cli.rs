//! CLI layer: clap parsing, dispatch to the API facade, terminal rendering.
//!
//! All user-facing concerns live here — the library returns data, the CLI
//! decides how to print it. Mutating commands persist on success; the data
//! stays where `--book` points (platform data dir by default).

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand};

use rolodexapp::api::RolodexApi;
use rolodexapp::book::RecordId;
use rolodexapp::model::{Address, Email, Note, Phone, Tag};
use rolodexapp::store::fs::FsBackend;

#[derive(Parser)]
#[command(name = "rolodex", about = "A personal contact directory", version)]
struct Cli {
    /// Path to the address book file (defaults to the platform data dir).
    #[arg(long, global = true, value_name = "FILE")]
    book: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Add a new contact.
    Add {
        /// Contact name.
        name: String,
        /// Birthday in YYYY-MM-DD form.
        #[arg(long)]
        birthday: Option<String>,
        /// Phone number (9 digits). Repeatable.
        #[arg(long = "phone")]
        phones: Vec<String>,
        /// Email address. Repeatable.
        #[arg(long = "email")]
        emails: Vec<String>,
        /// Tag label. Repeatable.
        #[arg(long = "tag")]
        tags: Vec<String>,
        /// Free-text note. Repeatable.
        #[arg(long = "note")]
        notes: Vec<String>,
    },
    /// Edit fields of an existing contact. Each flag is applied
    /// independently; one invalid field does not undo the others.
    Edit {
        id: RecordId,
        /// Replace the name.
        #[arg(long)]
        name: Option<String>,
        /// Set the birthday (YYYY-MM-DD).
        #[arg(long)]
        birthday: Option<String>,
        #[arg(long = "add-phone")]
        add_phones: Vec<String>,
        #[arg(long = "remove-phone")]
        remove_phones: Vec<String>,
        /// Replace a phone: OLD NEW. The replacement is appended at the end.
        #[arg(long = "edit-phone", num_args = 2, value_names = ["OLD", "NEW"])]
        edit_phones: Vec<String>,
        #[arg(long = "add-email")]
        add_emails: Vec<String>,
        #[arg(long = "remove-email")]
        remove_emails: Vec<String>,
        #[arg(long = "add-tag")]
        add_tags: Vec<String>,
        #[arg(long = "remove-tag")]
        remove_tags: Vec<String>,
        #[arg(long = "add-note")]
        add_notes: Vec<String>,
    },
    /// Set or replace a contact's postal address.
    Address {
        id: RecordId,
        #[arg(long)]
        street: String,
        #[arg(long)]
        city: String,
        #[arg(long)]
        postal_code: String,
        #[arg(long)]
        country: String,
    },
    /// Delete a contact by id, or list candidates matching a name.
    Delete {
        /// Record id to delete.
        #[arg(long, conflicts_with = "name")]
        id: Option<RecordId>,
        /// Name to search for; prints matching candidates and their ids.
        #[arg(long)]
        name: Option<String>,
    },
    /// Search contacts by name, phone, or email substring.
    Find { term: String },
    /// List all contacts, five per page.
    List,
    /// Days until a contact's next birthday.
    Birthday { id: RecordId },
    /// Print the address book file path.
    Path,
}

pub fn run() -> Result<()> {
    // Logs go to stderr; RUST_LOG overrides the default level. The handle
    // must stay alive for the life of the program.
    let _logger = flexi_logger::Logger::try_with_env_or_str("warn")
        .context("invalid RUST_LOG value")?
        .start()
        .context("failed to start logger")?;

    let cli = Cli::parse();
    let path = match cli.book {
        Some(path) => path,
        None => rolodexapp::config::default_book_path()?,
    };
    let mut api = RolodexApi::open(FsBackend::new(&path))?;

    match cli.command {
        Command::Add {
            name,
            birthday,
            phones,
            emails,
            tags,
            notes,
        } => {
            let mut record = RolodexApi::<FsBackend>::create_record(&name, birthday.as_deref())?;
            for phone in phones {
                record.add_phone(Phone::new(phone)?);
            }
            for email in emails {
                record.add_email(Email::new(email)?);
            }
            for tag in tags {
                record.add_tag(Tag::new(tag));
            }
            for note in notes {
                record.add_note(Note::new(note));
            }
            let id = api.add_record(record);
            api.save()?;
            println!("Added record with ID: {id}.");
        }

        Command::Edit {
            id,
            name,
            birthday,
            add_phones,
            remove_phones,
            edit_phones,
            add_emails,
            remove_emails,
            add_tags,
            remove_tags,
            add_notes,
        } => {
            let record = api
                .record_mut(id)
                .ok_or_else(|| anyhow!("Record not found: {id}"))?;

            // Apply each field independently; report failures and keep going.
            let mut failures = Vec::new();
            apply(&mut failures, "name", name, |raw| {
                record.edit_name(rolodexapp::model::Name::new(raw)?);
                Ok(())
            });
            apply(&mut failures, "birthday", birthday, |raw| {
                record.set_birthday(rolodexapp::model::Birthday::new(&raw)?);
                Ok(())
            });
            for raw in add_phones {
                apply(&mut failures, "phone", Some(raw), |raw| {
                    record.add_phone(Phone::new(raw)?);
                    Ok(())
                });
            }
            for raw in remove_phones {
                apply(&mut failures, "phone", Some(raw), |raw| {
                    let phone = Phone::new(raw)?;
                    if !record.remove_phone(&phone) {
                        println!("Phone not on record: {phone}");
                    }
                    Ok(())
                });
            }
            for pair in edit_phones.chunks(2) {
                let (old, new) = (pair[0].clone(), pair[1].clone());
                apply(&mut failures, "phone", Some(new), |raw| {
                    let old = Phone::new(old)?;
                    if !record.edit_phone(&old, Phone::new(raw)?) {
                        println!("Phone not on record: {old}");
                    }
                    Ok(())
                });
            }
            for raw in add_emails {
                apply(&mut failures, "email", Some(raw), |raw| {
                    record.add_email(Email::new(raw)?);
                    Ok(())
                });
            }
            for raw in remove_emails {
                apply(&mut failures, "email", Some(raw), |raw| {
                    let email = Email::new(raw)?;
                    if !record.remove_email(&email) {
                        println!("Email not on record: {email}");
                    }
                    Ok(())
                });
            }
            for raw in add_tags {
                record.add_tag(Tag::new(raw));
            }
            for raw in remove_tags {
                if !record.remove_tag(&Tag::new(raw.as_str())) {
                    println!("Tag not on record: {raw}");
                }
            }
            for raw in add_notes {
                record.add_note(Note::new(raw));
            }

            api.save()?;
            for failure in &failures {
                eprintln!("{failure}");
            }
            println!("Updated record {id}.");
        }

        Command::Address {
            id,
            street,
            city,
            postal_code,
            country,
        } => {
            let record = api
                .record_mut(id)
                .ok_or_else(|| anyhow!("Record not found: {id}"))?;
            record.set_address(Address {
                street,
                city,
                postal_code,
                country,
            });
            api.save()?;
            println!("Updated address for record {id}.");
        }

        Command::Delete { id, name } => match (id, name) {
            (Some(id), _) => {
                let record = api.delete_by_id(id)?;
                api.save()?;
                println!("Deleted record {id}: {}", record.name());
            }
            (None, Some(name)) => {
                let candidates = api.deletion_candidates(&name);
                if candidates.is_empty() {
                    println!("No matching records.");
                    if let Ok(closest) = api.suggest_name(&name) {
                        println!("Did you mean: {}?", closest.name());
                    }
                } else {
                    println!("Matching records (re-run with --id to delete one):");
                    for (id, record) in candidates {
                        println!("ID: {id}, {record}");
                    }
                }
            }
            (None, None) => return Err(anyhow!("Pass --id or --name")),
        },

        Command::Find { term } => {
            let found = api.find(&term);
            if found.is_empty() {
                println!("No matching records.");
            } else {
                for record in found {
                    println!("{record}");
                }
            }
        }

        Command::List => {
            if api.is_empty() {
                println!("The address book is empty.");
            }
            for (page_no, page) in api.pages().enumerate() {
                if page_no > 0 {
                    println!("---");
                }
                for (id, record) in page {
                    println!("ID: {id}, {record}");
                }
            }
        }

        Command::Birthday { id } => {
            let record = api
                .record(id)
                .ok_or_else(|| anyhow!("Record not found: {id}"))?;
            match record.days_to_birthday(Local::now().naive_local()) {
                Some(days) => println!("Days to birthday: {days}"),
                None => println!("No birthday on record."),
            }
        }

        Command::Path => println!("{}", path.display()),
    }

    Ok(())
}

/// Runs one field edit, recording a printable failure instead of aborting.
fn apply<F>(failures: &mut Vec<String>, field: &str, raw: Option<String>, op: F)
where
    F: FnOnce(String) -> anyhow::Result<()>,
{
    if let Some(raw) = raw {
        if let Err(err) = op(raw) {
            failures.push(format!("Skipped {field}: {err}"));
        }
    }
}
