//! Interactive storefront shell.
//!
//! Reads one command per line. `fetch` runs in the background so cart
//! commands keep working while the catalog loads.

use std::io::Write;
use std::str::FromStr;

use anyhow::{anyhow, bail, Result};
use nextbuy_core::{Product, ProductId};
use nextbuy_store::{CatalogLoader, Store};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, warn};

use crate::render;

const HELP: &str = "\
Commands:
  fetch        load the catalog in the background
  products     list loaded products
  add <id>     add a product to the cart
  inc <id>     increase quantity
  dec <id>     decrease quantity (stops at 1)
  rm <id>      remove from cart
  cart         show cart and totals
  status       show catalog status
  help         show this message
  quit         leave the shell";

/// One parsed shell line.
#[derive(Debug, Clone, PartialEq)]
pub enum ShellCommand {
    Fetch,
    Products,
    Add(ProductId),
    Inc(ProductId),
    Dec(ProductId),
    Rm(ProductId),
    Cart,
    Status,
    Help,
    Quit,
}

impl FromStr for ShellCommand {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> Result<Self> {
        let mut parts = line.split_whitespace();
        let Some(verb) = parts.next() else {
            bail!("empty command");
        };
        let arg = parts.next();
        if parts.next().is_some() {
            bail!("too many arguments for `{}`", verb);
        }

        let id = || -> Result<ProductId> {
            let raw = arg.ok_or_else(|| anyhow!("`{}` needs a product id", verb))?;
            Ok(raw.parse::<ProductId>().unwrap_or_else(|never| match never {}))
        };

        let command = match verb.to_lowercase().as_str() {
            "fetch" => ShellCommand::Fetch,
            "products" | "ls" => ShellCommand::Products,
            "add" => ShellCommand::Add(id()?),
            "inc" => ShellCommand::Inc(id()?),
            "dec" => ShellCommand::Dec(id()?),
            "rm" | "remove" => ShellCommand::Rm(id()?),
            "cart" => ShellCommand::Cart,
            "status" => ShellCommand::Status,
            "help" | "?" => ShellCommand::Help,
            "quit" | "exit" | "q" => ShellCommand::Quit,
            other => bail!("unknown command `{}` (type `help`)", other),
        };

        let takes_id = matches!(
            command,
            ShellCommand::Add(_) | ShellCommand::Inc(_) | ShellCommand::Dec(_) | ShellCommand::Rm(_)
        );
        if !takes_id && arg.is_some() {
            bail!("`{}` takes no arguments", verb);
        }

        Ok(command)
    }
}

/// Whether the shell keeps reading after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Command loop over one store and loader.
pub struct Shell {
    loader: CatalogLoader,
}

/// Text form of a numeric id, for catalogs that key products by `"7"`.
fn as_text(id: &ProductId) -> Option<ProductId> {
    match id {
        ProductId::Number(n) => Some(ProductId::Text(n.to_string())),
        ProductId::Text(_) => None,
    }
}

impl Shell {
    /// Creates a shell driving `loader`.
    pub fn new(loader: CatalogLoader) -> Self {
        Shell { loader }
    }

    fn store(&self) -> &Store {
        self.loader.store()
    }

    /// Runs one command. Must be called inside a tokio runtime.
    pub fn execute<W: Write>(&self, command: ShellCommand, out: &mut W) -> Result<Flow> {
        debug!(?command, "Shell command");
        let store = self.store();

        match command {
            ShellCommand::Fetch => {
                let task = self.loader.spawn();
                tokio::spawn(async move {
                    match task.await {
                        Ok(Ok(count)) => debug!(count, "Background fetch finished"),
                        Ok(Err(err)) => debug!(error = %err, "Background fetch failed"),
                        Err(err) => warn!(error = %err, "Fetch task panicked"),
                    }
                });
                writeln!(out, "Fetching products... (`status` to check)")?;
            }
            ShellCommand::Products => render::write_catalog(out, &store.catalog())?,
            ShellCommand::Add(id) => match self.find_product(&id) {
                Some(product) => {
                    let name = product.title().unwrap_or("product").to_string();
                    let resolved = product.id.clone();
                    store.add_to_cart(product);
                    let qty = store.cart().get(&resolved).map(|line| line.qty).unwrap_or(0);
                    writeln!(out, "Added {} (qty {})", name, qty)?;
                }
                None => writeln!(out, "No product {} in the catalog (try `fetch`)", id)?,
            },
            ShellCommand::Inc(id) => {
                let id = self.cart_id(id);
                store.increment_qty(id.clone());
                self.report_line(&id, out)?;
            }
            ShellCommand::Dec(id) => {
                let id = self.cart_id(id);
                store.decrement_qty(id.clone());
                self.report_line(&id, out)?;
            }
            ShellCommand::Rm(id) => {
                let id = self.cart_id(id);
                if store.remove_from_cart(id.clone()) {
                    writeln!(out, "Removed {}", id)?;
                } else {
                    writeln!(out, "{} is not in the cart", id)?;
                }
            }
            ShellCommand::Cart => render::write_cart(out, &store.cart())?,
            ShellCommand::Status => {
                let catalog = store.catalog();
                writeln!(
                    out,
                    "Catalog: {} ({} products), cart: {} lines",
                    catalog.status,
                    catalog.data.len(),
                    store.cart().len()
                )?;
            }
            ShellCommand::Help => writeln!(out, "{}", HELP)?,
            ShellCommand::Quit => return Ok(Flow::Quit),
        }

        Ok(Flow::Continue)
    }

    /// Catalog lookup; a numeric id that misses is retried as text.
    fn find_product(&self, id: &ProductId) -> Option<Product> {
        let store = self.store();
        store
            .find_product(id)
            .or_else(|| as_text(id).and_then(|text| store.find_product(&text)))
    }

    /// The cart line `id` refers to, trying the text form of a numeric id
    /// when there is no exact match.
    fn cart_id(&self, id: ProductId) -> ProductId {
        let cart = self.store().cart();
        if cart.get(&id).is_some() {
            return id;
        }
        match as_text(&id) {
            Some(text) if cart.get(&text).is_some() => text,
            _ => id,
        }
    }

    fn report_line<W: Write>(&self, id: &ProductId, out: &mut W) -> Result<()> {
        match self.store().cart().get(id) {
            Some(line) => writeln!(out, "{}: qty {}", id, line.qty)?,
            None => writeln!(out, "{} is not in the cart", id)?,
        }
        Ok(())
    }

    /// Reads commands until `quit` or end of input.
    pub async fn run<R, W>(&self, input: R, out: &mut W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        let mut lines = input.lines();
        write!(out, "> ")?;
        out.flush()?;

        while let Some(line) = lines.next_line().await? {
            if !line.trim().is_empty() {
                let flow = match line.parse::<ShellCommand>() {
                    Ok(command) => self.execute(command, out)?,
                    Err(err) => {
                        writeln!(out, "{}", err)?;
                        Flow::Continue
                    }
                };
                if flow == Flow::Quit {
                    break;
                }
            }
            write!(out, "> ")?;
            out.flush()?;
        }

        writeln!(out)?;
        Ok(())
    }
}
