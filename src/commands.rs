//! Command implementations for the Armarium CLI

use comfy_table::Table;
use tokio::io::BufReader;

use armarium_client::error::{ApiError, ApiResult};
use armarium_client::models::book::{BookQuery, CreateBook, UpdateBook};
use armarium_client::models::loan::{ExtendLoan, IssueLoan, Loan, LoanQuery};
use armarium_client::models::person::{PersonQuery, UpdatePerson};
use armarium_client::models::Role;
use armarium_client::scan::{looks_like_isbn, LineDecoder, ScanSession};
use armarium_client::session::RegisterForm;
use armarium_client::App;

use crate::cli::{BooksCommand, LoansCommand, PeopleCommand};

/// Central role gate: every protected command funnels through here before
/// any request leaves the process.
fn require_role(app: &App, roles: &[Role]) -> ApiResult<()> {
    if !app.session.is_authenticated() {
        return Err(ApiError::Authentication(
            "Not logged in; run `armarium login` first".to_string(),
        ));
    }
    if !app.session.has_role(roles) {
        let allowed: Vec<&str> = roles.iter().map(Role::as_str).collect();
        return Err(ApiError::Authorization(format!(
            "This operation requires one of: {}",
            allowed.join(", ")
        )));
    }
    Ok(())
}

const STAFF: &[Role] = &[Role::Librarian, Role::Admin];

pub async fn login(app: &App, email: &str, password: &str) -> ApiResult<()> {
    let identity = app.auth.login(email, password).await?;
    println!(
        "Logged in as {} ({})",
        identity.display_name(),
        identity.role
    );
    Ok(())
}

pub fn logout(app: &App) -> ApiResult<()> {
    app.auth.logout();
    println!("Logged out");
    Ok(())
}

pub fn whoami(app: &App) -> ApiResult<()> {
    let state = app.session.snapshot();
    match state.identity {
        Some(identity) => {
            println!("{} <{}>", identity.display_name(), identity.email);
            println!("id:   {}", identity.id);
            println!("role: {}", identity.role);
        }
        None => match state.error {
            Some(error) => println!("Session error: {}", error),
            None => println!("Not logged in"),
        },
    }
    Ok(())
}

pub async fn register(
    app: &App,
    name: String,
    email: String,
    password: String,
    confirm_password: String,
) -> ApiResult<()> {
    let form = RegisterForm {
        name,
        email,
        password,
        confirm_password,
    };
    app.auth.register(&form).await?;
    println!("Account created; log in with `armarium login`");
    Ok(())
}

pub async fn register_librarian(
    app: &App,
    name: String,
    email: String,
    password: String,
    confirm_password: String,
) -> ApiResult<()> {
    require_role(app, &[Role::Admin])?;
    let form = RegisterForm {
        name,
        email,
        password,
        confirm_password,
    };
    app.auth.register_librarian(&form).await?;
    println!("Librarian account created");
    Ok(())
}

pub async fn books(app: &App, command: BooksCommand) -> ApiResult<()> {
    match command {
        BooksCommand::List {
            search,
            page,
            per_page,
        } => {
            let query = BookQuery {
                search,
                page,
                per_page,
            };
            let page = app.api.books.list(&query).await?;

            let mut table = Table::new();
            table.set_header(vec!["ID", "Title", "Author", "ISBN", "Year", "Available"]);
            for book in &page.items {
                table.add_row(vec![
                    book.id.to_string(),
                    book.title.clone(),
                    book.author.clone().unwrap_or_default(),
                    book.isbn.clone().unwrap_or_default(),
                    book.release_year.map(|y| y.to_string()).unwrap_or_default(),
                    book.available.map(|a| a.to_string()).unwrap_or_default(),
                ]);
            }
            println!("{table}");
            println!("{} of {} books", page.items.len(), page.total);
        }
        BooksCommand::Show { id } => {
            let book = app.api.books.get(id).await?;
            println!("{:#?}", book);
        }
        BooksCommand::Add {
            title,
            author,
            isbn,
            publisher,
            release_year,
            copies,
        } => {
            require_role(app, STAFF)?;
            let book = app
                .api
                .books
                .create(&CreateBook {
                    title,
                    author,
                    isbn,
                    publisher,
                    release_year,
                    copies,
                })
                .await?;
            println!("Added book #{}: {}", book.id, book.title);
        }
        BooksCommand::Update {
            id,
            title,
            author,
            isbn,
            publisher,
            release_year,
            copies,
        } => {
            require_role(app, STAFF)?;
            let book = app
                .api
                .books
                .update(
                    id,
                    &UpdateBook {
                        title,
                        author,
                        isbn,
                        publisher,
                        release_year,
                        copies,
                    },
                )
                .await?;
            println!("Updated book #{}: {}", book.id, book.title);
        }
        BooksCommand::Remove { id } => {
            require_role(app, STAFF)?;
            app.api.books.remove(id).await?;
            println!("Removed book #{}", id);
        }
    }
    Ok(())
}

fn loan_row(loan: &Loan) -> Vec<String> {
    vec![
        loan.id.to_string(),
        loan.book.title.clone(),
        loan.person.name.clone(),
        loan.start_date.format("%Y-%m-%d").to_string(),
        loan.due_date().format("%Y-%m-%d").to_string(),
        loan.status().to_string(),
    ]
}

pub async fn loans(app: &App, command: LoansCommand) -> ApiResult<()> {
    match command {
        LoansCommand::List { person, all } => {
            let query = LoanQuery {
                person_id: person,
                include_returned: all.then_some(true),
                ..Default::default()
            };
            let page = app.api.loans.list(&query).await?;

            let mut table = Table::new();
            table.set_header(vec!["ID", "Book", "Person", "Start", "Due", "Status"]);
            for loan in &page.items {
                table.add_row(loan_row(loan));
            }
            println!("{table}");
            println!("{} of {} loans", page.items.len(), page.total);
        }
        LoansCommand::Issue { person, book, days } => {
            require_role(app, STAFF)?;
            let loan = app
                .api
                .loans
                .issue(&IssueLoan {
                    person_id: person,
                    book_id: book,
                    duration_days: days,
                })
                .await?;
            println!(
                "Loan #{} issued, due {}",
                loan.id,
                loan.due_date().format("%Y-%m-%d")
            );
        }
        LoansCommand::Return { id } => {
            require_role(app, STAFF)?;
            let loan = app.api.loans.return_loan(id).await?;
            println!("Loan #{} returned ({})", loan.id, loan.status());
        }
        LoansCommand::Extend { id, days } => {
            require_role(app, STAFF)?;
            let loan = app.api.loans.extend(id, &ExtendLoan { days }).await?;
            println!(
                "Loan #{} extended, now due {} ({})",
                loan.id,
                loan.due_date().format("%Y-%m-%d"),
                loan.status()
            );
        }
    }
    Ok(())
}

pub async fn people(app: &App, command: PeopleCommand) -> ApiResult<()> {
    match command {
        PeopleCommand::List { name } => {
            require_role(app, STAFF)?;
            let query = PersonQuery {
                name,
                ..Default::default()
            };
            let page = app.api.people.list(&query).await?;

            let mut table = Table::new();
            table.set_header(vec!["ID", "Name", "Email", "Role", "Loans", "Overdue"]);
            for person in &page.items {
                table.add_row(vec![
                    person.id.to_string(),
                    person.name.clone(),
                    person.email.clone(),
                    person.role.to_string(),
                    person.nb_loans.map(|n| n.to_string()).unwrap_or_default(),
                    person
                        .nb_overdue_loans
                        .map(|n| n.to_string())
                        .unwrap_or_default(),
                ]);
            }
            println!("{table}");
            println!("{} of {} people", page.items.len(), page.total);
        }
        PeopleCommand::Show { id } => {
            require_role(app, STAFF)?;
            let person = app.api.people.get(id).await?;
            println!("{:#?}", person);
        }
        PeopleCommand::Update {
            id,
            name,
            email,
            role,
        } => {
            require_role(app, STAFF)?;
            let role = match role {
                Some(slug) => {
                    // Changing a role is account administration
                    require_role(app, &[Role::Admin])?;
                    Some(slug.parse::<Role>().map_err(ApiError::Validation)?)
                }
                None => None,
            };
            let person = app
                .api
                .people
                .update(id, &UpdatePerson { name, email, role })
                .await?;
            println!("Updated person #{}: {}", person.id, person.name);
        }
        PeopleCommand::Remove { id } => {
            require_role(app, &[Role::Admin])?;
            app.api.people.remove(id).await?;
            println!("Removed person #{}", id);
        }
    }
    Ok(())
}

pub async fn summary(app: &App) -> ApiResult<()> {
    let summary = app.api.summary.get().await?;
    println!("Books:         {}", summary.books);
    println!("People:        {}", summary.people);
    println!("Active loans:  {}", summary.active_loans);
    println!("Overdue loans: {}", summary.overdue_loans);
    Ok(())
}

pub async fn lookup(app: &App, isbn: &str) -> ApiResult<()> {
    match app.lookup.by_isbn(isbn).await? {
        Some(record) => {
            let book = record.to_create_book(isbn);
            println!("Title:     {}", book.title);
            println!("Author:    {}", book.author.unwrap_or_default());
            println!("Publisher: {}", book.publisher.unwrap_or_default());
            if let Some(year) = book.release_year {
                println!("Year:      {}", year);
            }
        }
        None => println!("No record found for {}", isbn),
    }
    Ok(())
}

pub async fn scan(app: &App) -> ApiResult<()> {
    let stdin = BufReader::new(tokio::io::stdin());
    let mut session = ScanSession::new(LineDecoder::new(stdin));

    match session.first_match(looks_like_isbn).await? {
        Some(isbn) => {
            println!("Scanned {}", isbn);
            lookup(app, &isbn).await
        }
        None => {
            println!("No ISBN scanned");
            Ok(())
        }
    }
}
