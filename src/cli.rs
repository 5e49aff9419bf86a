//! CLI argument definitions for the Armarium client

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "armarium",
    version,
    about = "Armarium - Library management client",
    long_about = "Command-line client for an Armarium library server.\n\n\
                  Sessions persist between runs; log in once, then browse the\n\
                  catalog, manage loans and administer accounts."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Explicit log level (overrides configuration)
    #[arg(long = "log-level", value_name = "LEVEL", global = true)]
    pub log_level: Option<String>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Log in and persist the session token
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },

    /// Clear the current session
    Logout,

    /// Show the identity decoded from the current session token
    Whoami,

    /// Create a reader account (does not log in)
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        confirm_password: String,
    },

    /// Create a librarian account (admin only)
    RegisterLibrarian {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        confirm_password: String,
    },

    /// Browse and manage the catalog
    Books {
        #[command(subcommand)]
        command: BooksCommand,
    },

    /// Issue, return and extend loans
    Loans {
        #[command(subcommand)]
        command: LoansCommand,
    },

    /// Administer borrower accounts
    People {
        #[command(subcommand)]
        command: PeopleCommand,
    },

    /// Library-wide counters
    Summary,

    /// Look up a bibliographic record by ISBN
    Lookup {
        isbn: String,
    },

    /// Read candidate codes from stdin and look up the first ISBN
    Scan,
}

#[derive(Subcommand)]
pub enum BooksCommand {
    /// List catalog entries
    List {
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        page: Option<i64>,
        #[arg(long)]
        per_page: Option<i64>,
    },
    /// Show one book
    Show { id: i32 },
    /// Add a book to the catalog (librarian)
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        author: Option<String>,
        #[arg(long)]
        isbn: Option<String>,
        #[arg(long)]
        publisher: Option<String>,
        #[arg(long)]
        release_year: Option<i32>,
        #[arg(long)]
        copies: Option<i32>,
    },
    /// Update a catalog entry (librarian)
    Update {
        id: i32,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        author: Option<String>,
        #[arg(long)]
        isbn: Option<String>,
        #[arg(long)]
        publisher: Option<String>,
        #[arg(long)]
        release_year: Option<i32>,
        #[arg(long)]
        copies: Option<i32>,
    },
    /// Remove a catalog entry (librarian)
    Remove { id: i32 },
}

#[derive(Subcommand)]
pub enum LoansCommand {
    /// List loans, open ones by default
    List {
        /// Restrict to one person
        #[arg(long)]
        person: Option<i32>,
        /// Include returned loans
        #[arg(long)]
        all: bool,
    },
    /// Issue a loan (librarian)
    Issue {
        #[arg(long)]
        person: i32,
        #[arg(long)]
        book: i32,
        #[arg(long)]
        days: Option<u32>,
    },
    /// Record a return (librarian)
    Return { id: i32 },
    /// Extend an open loan (librarian)
    Extend {
        id: i32,
        #[arg(long, default_value_t = 7)]
        days: u32,
    },
}

#[derive(Subcommand)]
pub enum PeopleCommand {
    /// List borrower accounts (librarian)
    List {
        #[arg(long)]
        name: Option<String>,
    },
    /// Show one account (librarian)
    Show { id: i32 },
    /// Update an account (librarian; role changes admin only)
    Update {
        id: i32,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        role: Option<String>,
    },
    /// Delete an account (admin)
    Remove { id: i32 },
}
