//! # Register Command Loop
//!
//! A line-command front end over the transaction engine.
//!
//! ## Command Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Register Commands                                  │
//! │                                                                         │
//! │  Catalog        find <term>        search by name                       │
//! │                 cat <category>     browse one category                  │
//! │                                                                         │
//! │  Cart           scan <code>        resolve id/barcode, add one unit     │
//! │                 add <code> [qty]   tap-to-add with quantity             │
//! │                 qty <code> <n>     set line quantity (0 removes)        │
//! │                 remove <code>      remove a line                        │
//! │                 clear              empty the cart                       │
//! │                 cart               show lines and totals                │
//! │                                                                         │
//! │  Checkout       checkout           open payment, show amount due        │
//! │                 cash <amount>      cash tender, e.g. cash 30.00         │
//! │                 card|wallet|upi    non-cash tender (stub authorizer)    │
//! │                 cancel             abandon payment, keep the cart       │
//! │                                                                         │
//! │  Reporting      sales              list completed sales                 │
//! │                 export             dump the journal as JSON             │
//! │                                                                         │
//! │  Misc           help, quit                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::io::{self, BufRead, Write};

use meridian_checkout::{
    CartView, InMemoryCatalog, InMemoryInventory, InMemoryJournal, Notice, NotificationSurface,
    TransactionEngine,
};
use meridian_core::money::Money;
use meridian_core::types::{Product, Tender};

use crate::config::RegisterConfig;
use crate::receipt::render_receipt;

/// The engine as wired by this binary.
pub type RegisterEngine =
    TransactionEngine<InMemoryCatalog, InMemoryInventory, InMemoryJournal, ConsoleNotifier>;

// =============================================================================
// Console Notifier
// =============================================================================

/// Notification surface that prints advisory lines for the cashier.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier;

impl NotificationSurface for ConsoleNotifier {
    fn notify(&self, notice: &Notice) {
        match notice {
            Notice::LineAdded { name, quantity } => {
                println!("  + {} x{} added to cart", name, quantity);
            }
            Notice::CartCleared => println!("  cart cleared"),
            Notice::ProductNotFound { code } => println!("  ! product not found: {}", code),
            Notice::PaymentAccepted { method, change_cents } => {
                println!(
                    "  payment successful ({}), change {}",
                    method,
                    Money::from_cents(*change_cents)
                );
            }
            Notice::TenderRejected { reason } => println!("  ! {}", reason),
            Notice::CheckoutCancelled => println!("  checkout cancelled, cart kept"),
        }
    }
}

// =============================================================================
// Command Parsing
// =============================================================================

/// A parsed register command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Scan(String),
    Add { code: String, quantity: i64 },
    Qty { code: String, quantity: i64 },
    Remove(String),
    Clear,
    Cart,
    Find(String),
    Category(String),
    Checkout,
    Cash(String),
    Card,
    Wallet,
    Upi,
    Cancel,
    Sales,
    Export,
    Help,
    Quit,
}

impl Command {
    /// Parses one input line. Errors are usage messages for the cashier.
    pub fn parse(input: &str) -> Result<Command, String> {
        let mut parts = input.split_whitespace();
        let verb = parts.next().ok_or("")?.to_lowercase();
        let rest: Vec<&str> = parts.collect();

        let one_arg = |usage: &str| -> Result<String, String> {
            match rest.as_slice() {
                [arg] => Ok((*arg).to_string()),
                _ => Err(format!("usage: {}", usage)),
            }
        };

        match verb.as_str() {
            "scan" => Ok(Command::Scan(one_arg("scan <code>")?)),
            "add" => match rest.as_slice() {
                [code] => Ok(Command::Add {
                    code: (*code).to_string(),
                    quantity: 1,
                }),
                [code, qty] => {
                    let quantity = qty
                        .parse::<i64>()
                        .map_err(|_| "usage: add <code> [qty]".to_string())?;
                    Ok(Command::Add {
                        code: (*code).to_string(),
                        quantity,
                    })
                }
                _ => Err("usage: add <code> [qty]".to_string()),
            },
            "qty" => match rest.as_slice() {
                [code, qty] => {
                    let quantity = qty
                        .parse::<i64>()
                        .map_err(|_| "usage: qty <code> <n>".to_string())?;
                    Ok(Command::Qty {
                        code: (*code).to_string(),
                        quantity,
                    })
                }
                _ => Err("usage: qty <code> <n>".to_string()),
            },
            "remove" => Ok(Command::Remove(one_arg("remove <code>")?)),
            "clear" => Ok(Command::Clear),
            "cart" => Ok(Command::Cart),
            "find" => Ok(Command::Find(rest.join(" "))),
            "cat" => Ok(Command::Category(one_arg("cat <category>")?)),
            "checkout" => Ok(Command::Checkout),
            "cash" => Ok(Command::Cash(one_arg("cash <amount>")?)),
            "card" => Ok(Command::Card),
            "wallet" => Ok(Command::Wallet),
            "upi" => Ok(Command::Upi),
            "cancel" => Ok(Command::Cancel),
            "sales" => Ok(Command::Sales),
            "export" => Ok(Command::Export),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            other => Err(format!("unknown command: {} (try 'help')", other)),
        }
    }
}

// =============================================================================
// Command Loop
// =============================================================================

/// Whether the loop should keep reading.
#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Runs the register loop until `quit` or end of input.
pub async fn run(
    engine: &RegisterEngine,
    journal: &InMemoryJournal,
    inventory: &InMemoryInventory,
    config: &RegisterConfig,
) -> io::Result<()> {
    println!("{} - type 'help' for commands", config.store_name);

    let stdin = io::stdin();
    prompt()?;
    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            prompt()?;
            continue;
        }

        match Command::parse(&line) {
            Ok(command) => {
                if dispatch(command, engine, journal, inventory, config).await == Flow::Quit {
                    break;
                }
            }
            Err(message) => {
                if !message.is_empty() {
                    println!("  {}", message);
                }
            }
        }
        prompt()?;
    }

    println!("register closed");
    Ok(())
}

fn prompt() -> io::Result<()> {
    print!("pos> ");
    io::stdout().flush()
}

async fn dispatch(
    command: Command,
    engine: &RegisterEngine,
    journal: &InMemoryJournal,
    inventory: &InMemoryInventory,
    config: &RegisterConfig,
) -> Flow {
    match command {
        Command::Scan(code) => match engine.scan(&code).await {
            Ok(view) => print_cart(&view, config),
            Err(err) => println!("  ! {}", err),
        },
        Command::Add { code, quantity } => {
            // Tap-to-add: resolve once, then add with the chosen quantity
            match engine.lookup(&code).await {
                Ok(product) => match engine.add_product(&product, quantity) {
                    Ok(view) => print_cart(&view, config),
                    Err(err) => println!("  ! {}", err),
                },
                Err(err) => println!("  ! {}", err),
            }
        }
        Command::Qty { code, quantity } => match engine.set_quantity(&code, quantity) {
            Ok(view) => print_cart(&view, config),
            Err(err) => println!("  ! {}", err),
        },
        Command::Remove(code) => print_cart(&engine.remove_line(&code), config),
        Command::Clear => {
            engine.clear_cart();
        }
        Command::Cart => print_cart(&engine.cart_view(), config),
        Command::Find(term) => match engine.search_products(&term).await {
            Ok(products) => print_products(&products, inventory, config),
            Err(err) => println!("  ! {}", err),
        },
        Command::Category(category) => {
            let products = engine.products_in_category(&category).await;
            if products.is_empty() {
                println!("  no products in category '{}'", category);
            } else {
                print_products(&products, inventory, config);
            }
        }
        Command::Checkout => match engine.begin_checkout() {
            Ok(due) => {
                println!("  amount due {}", config.format_currency(due.total_cents));
                let quick = due.total().ceil_to_major();
                if quick > due.total() {
                    println!(
                        "  quick tender: cash {} | card | wallet | upi",
                        config.format_currency(quick.cents())
                    );
                } else {
                    println!("  tender with: cash <amount> | card | wallet | upi");
                }
            }
            Err(err) => println!("  ! {}", err),
        },
        Command::Cash(amount) => match amount.parse::<Money>() {
            Ok(amount_received) => {
                settle(engine, &Tender::Cash { amount_received }, config).await
            }
            Err(err) => println!("  ! {}", err),
        },
        Command::Card => settle(engine, &Tender::Card, config).await,
        Command::Wallet => settle(engine, &Tender::Wallet, config).await,
        Command::Upi => settle(engine, &Tender::Upi, config).await,
        Command::Cancel => {
            if let Err(err) = engine.cancel_checkout() {
                println!("  ! {}", err);
            }
        }
        Command::Sales => {
            let sales = journal.sales();
            if sales.is_empty() {
                println!("  no sales recorded");
            }
            for sale in sales {
                let short_id: String = sale.id.chars().take(8).collect();
                println!(
                    "  {}  {}  {} line(s)  {}  {}",
                    short_id,
                    sale.completed_at.format("%H:%M:%S"),
                    sale.lines.len(),
                    sale.tender_method,
                    config.format_currency(sale.total_cents)
                );
            }
        }
        Command::Export => match journal.export_json() {
            Ok(json) => println!("{}", json),
            Err(err) => println!("  ! {}", err),
        },
        Command::Help => print_help(),
        Command::Quit => return Flow::Quit,
    }
    Flow::Continue
}

/// Submits a tender and prints the receipt on completion.
async fn settle(engine: &RegisterEngine, tender: &Tender, config: &RegisterConfig) {
    match engine.submit_tender(tender).await {
        Ok(sale) => {
            println!("{}", render_receipt(&sale, config));
        }
        Err(err) => println!("  ! {}", err),
    }
}

// =============================================================================
// Display Helpers
// =============================================================================

fn print_cart(view: &CartView, config: &RegisterConfig) {
    if view.lines.is_empty() {
        println!("  cart is empty");
        return;
    }

    for line in &view.lines {
        println!(
            "  {:<24} x{:<4} {:>8}",
            line.name,
            line.quantity,
            config.format_currency(line.line_total().cents())
        );
    }
    println!(
        "  subtotal {}  tax {}  total {}",
        config.format_currency(view.pricing.subtotal_cents),
        config.format_currency(view.pricing.tax_cents),
        config.format_currency(view.pricing.total_cents)
    );
}

fn print_products(products: &[Product], inventory: &InMemoryInventory, config: &RegisterConfig) {
    if products.is_empty() {
        println!("  no matching products");
        return;
    }

    for product in products {
        let on_hand = inventory
            .level_of(&product.id)
            .map(|level| level.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "  {:<10} {:<24} {:>8}  stock {}",
            product.id,
            product.name,
            config.format_currency(product.unit_price_cents),
            on_hand
        );
    }
}

fn print_help() {
    println!("  catalog:   find <term> | cat <category>");
    println!("  cart:      scan <code> | add <code> [qty] | qty <code> <n>");
    println!("             remove <code> | clear | cart");
    println!("  checkout:  checkout | cash <amount> | card | wallet | upi | cancel");
    println!("  reports:   sales | export");
    println!("  misc:      help | quit");
}

// =============================================================================
// Unit Tests
// =============================================================================
