//! Mbarete Eléctrico CLI - price-list conversion and cart tools.
//!
//! # Usage
//!
//! ```bash
//! # Convert the supplier price list to the code→price JSON map
//! mbarete precios convertir -e src/data/precios.csv -s src/data/precios.json
//!
//! # Build an order against a catalog feed
//! mbarete pedido agregar cable-2.5 -c catalogo.json
//! mbarete pedido cantidad cable-2.5 10
//! mbarete pedido ciudad asuncion
//! mbarete pedido pago transferencia
//! mbarete pedido cliente -n "Ana Benítez"
//! mbarete pedido enviar
//!
//! # Wholesale price inquiry for the same cart
//! mbarete pedido enviar --mayorista
//! ```
//!
//! # Commands
//!
//! - `precios convertir` - One-shot CSV → JSON price map conversion
//! - `pedido` - Cart operations against a locally persisted order

#![cfg_attr(not(test), forbid(unsafe_code))]
// Printing is this crate's output channel.
#![allow(clippy::print_stdout)]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "mbarete")]
#[command(author, version, about = "Mbarete Eléctrico CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Price-list utilities
    Precios {
        #[command(subcommand)]
        action: PreciosAction,
    },
    /// Build and send an order
    Pedido {
        /// File the cart and customer data are persisted in
        #[arg(long, default_value = "pedido.json", global = true)]
        datos: PathBuf,

        #[command(subcommand)]
        action: PedidoAction,
    },
}

#[derive(Subcommand)]
enum PreciosAction {
    /// Convert a `codigoProducto,precioPublico` CSV into a JSON price map
    Convertir {
        /// Input CSV path
        #[arg(short, long, default_value = "src/data/precios.csv")]
        entrada: PathBuf,

        /// Output JSON path
        #[arg(short, long, default_value = "src/data/precios.json")]
        salida: PathBuf,
    },
}

#[derive(Subcommand)]
enum PedidoAction {
    /// Add one unit of a catalog product to the cart
    Agregar {
        /// Product slug
        slug: String,

        /// Catalog feed (JSON array of products)
        #[arg(short, long, default_value = "catalogo.json")]
        catalogo: PathBuf,
    },
    /// Show the cart with derived totals
    Listar,
    /// Set the quantity of a cart item (floored, clamped to 1)
    Cantidad { slug: String, cantidad: f64 },
    /// Remove an item from the cart
    Quitar { slug: String },
    /// Empty the cart
    Vaciar,
    /// Choose the delivery zone
    Ciudad {
        /// Zone id, e.g. `asuncion`, `san-lorenzo`
        ciudad: String,
    },
    /// List the delivery zones and their costs
    Ciudades,
    /// Choose the payment method (transferencia, tigo, puerta)
    Pago { metodo: String },
    /// Record customer details for checkout
    Cliente {
        #[arg(short, long)]
        nombre: Option<String>,

        /// CI or RUC
        #[arg(short, long)]
        doc: Option<String>,

        /// Delivery address (required for pago en puerta)
        #[arg(short = 'i', long)]
        direccion: Option<String>,
    },
    /// Print the WhatsApp link for the order
    Enviar {
        /// Ask for wholesale pricing instead of placing a retail order
        #[arg(long)]
        mayorista: bool,
    },
}

fn main() {
    tracing_subscriber::fmt::init();
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli);

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Precios { action } => match action {
            PreciosAction::Convertir { entrada, salida } => {
                commands::precios::convertir(&entrada, &salida)?;
            }
        },
        Commands::Pedido { datos, action } => match action {
            PedidoAction::Agregar { slug, catalogo } => {
                commands::pedido::agregar(&datos, &catalogo, &slug)?;
            }
            PedidoAction::Listar => commands::pedido::listar(&datos)?,
            PedidoAction::Cantidad { slug, cantidad } => {
                commands::pedido::cantidad(&datos, &slug, cantidad)?;
            }
            PedidoAction::Quitar { slug } => commands::pedido::quitar(&datos, &slug)?,
            PedidoAction::Vaciar => commands::pedido::vaciar(&datos),
            PedidoAction::Ciudad { ciudad } => commands::pedido::ciudad(&datos, &ciudad)?,
            PedidoAction::Ciudades => commands::pedido::ciudades(),
            PedidoAction::Pago { metodo } => commands::pedido::pago(&datos, &metodo)?,
            PedidoAction::Cliente {
                nombre,
                doc,
                direccion,
            } => commands::pedido::cliente(&datos, nombre, doc, direccion),
            PedidoAction::Enviar { mayorista } => {
                commands::pedido::enviar(&datos, mayorista)?;
            }
        },
    }
    Ok(())
}
