//! Line-oriented interactive session over an in-memory catalog.

use super::{chart, list, rate, ui};
use crate::core::valuation::{fetch_rate, top_n};
use crate::core::{
    Catalog, CurrencyPair, CurrencyRateProvider, InputMode, ProductForm, ProductId, RateSlot,
};
use anyhow::{Context, Result};
use std::io::Write;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};
use tracing::debug;

const HELP: &str = "\
Commands:
  list              show products with converted prices
  add               add a product
  remove <position> remove the product at a list position
  delete <id>       remove the product with the given id
  chart             chart the most expensive products
  rate              show the current exchange rate
  help              show this help
  quit              end the session";

#[derive(Debug, Clone, PartialEq)]
enum Command {
    List,
    Add,
    Remove(usize),
    Delete(ProductId),
    Chart,
    Rate,
    Help,
    Quit,
    Nothing,
}

fn parse_command(line: &str) -> Result<Command, String> {
    let mut parts = line.split_whitespace();
    let Some(word) = parts.next() else {
        return Ok(Command::Nothing);
    };
    let arg = parts.next();
    if parts.next().is_some() {
        return Err(format!("Too many arguments for '{word}'"));
    }

    let no_arg = |command: Command| match arg {
        None => Ok(command),
        Some(_) => Err(format!("'{word}' takes no arguments")),
    };
    let required_arg = || arg.ok_or_else(|| format!("'{word}' needs an argument"));

    match word.to_lowercase().as_str() {
        "list" | "ls" => no_arg(Command::List),
        "add" => no_arg(Command::Add),
        "chart" => no_arg(Command::Chart),
        "rate" => no_arg(Command::Rate),
        "help" | "?" => no_arg(Command::Help),
        "quit" | "exit" | "q" => no_arg(Command::Quit),
        "remove" | "rm" => {
            let arg = required_arg()?;
            arg.parse::<usize>()
                .map(Command::Remove)
                .map_err(|_| format!("'{arg}' is not a list position"))
        }
        "delete" => {
            let arg = required_arg()?;
            arg.parse::<u64>()
                .map(|id| Command::Delete(ProductId::from(id)))
                .map_err(|_| format!("'{arg}' is not a product id"))
        }
        _ => Err(format!("Unknown command '{word}'. Type `help` for commands.")),
    }
}

enum View {
    Home,
    /// The list view owns the rate fetched when it was entered.
    List(RateSlot),
    Chart,
}

pub struct Session {
    catalog: Catalog,
    provider: Arc<dyn CurrencyRateProvider>,
    pair: CurrencyPair,
    input_mode: InputMode,
    top: usize,
    view: View,
}

impl Session {
    pub fn new(
        catalog: Catalog,
        provider: Arc<dyn CurrencyRateProvider>,
        pair: CurrencyPair,
        input_mode: InputMode,
        top: usize,
    ) -> Self {
        Self {
            catalog,
            provider,
            pair,
            input_mode,
            top,
            view: View::Home,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Reads commands from `input` until `quit` or end of input.
    pub async fn run<R, W>(&mut self, input: R, out: &mut W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        let mut lines = input.lines();
        writeln!(out, "{HELP}")?;

        loop {
            write!(out, "> ")?;
            out.flush()?;
            let Some(line) = lines.next_line().await.context("Failed to read input")? else {
                break;
            };

            match parse_command(&line) {
                Ok(Command::Quit) => break,
                Ok(command) => self.dispatch(command, &mut lines, out).await?,
                Err(message) => writeln!(out, "{}", ui::style_text(&message, ui::StyleType::Error))?,
            }
        }

        debug!(products = self.catalog.len(), "Session ended");
        Ok(())
    }

    async fn dispatch<R, W>(
        &mut self,
        command: Command,
        lines: &mut Lines<R>,
        out: &mut W,
    ) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        debug!(?command, "Dispatching session command");
        match command {
            Command::List => {
                self.activate_list().await;
                self.render_list(out)?;
            }
            Command::Add => {
                if self.add_product(lines, out).await? {
                    self.refresh_list(out)?;
                }
            }
            Command::Remove(position) => {
                let removed = position
                    .checked_sub(1)
                    .and_then(|index| self.catalog.remove_at(index));
                match removed {
                    Some(product) => {
                        writeln!(out, "Removed {}", product.name)?;
                        self.refresh_list(out)?;
                    }
                    None => writeln!(
                        out,
                        "{}",
                        ui::style_text(
                            &format!("No product at position {position}"),
                            ui::StyleType::Error
                        )
                    )?,
                }
            }
            Command::Delete(id) => match self.catalog.remove(id) {
                Some(product) => {
                    writeln!(out, "Removed {}", product.name)?;
                    self.refresh_list(out)?;
                }
                None => writeln!(
                    out,
                    "{}",
                    ui::style_text(&format!("No product with id {id}"), ui::StyleType::Error)
                )?,
            },
            Command::Chart => {
                self.view = View::Chart;
                let ranking = top_n(self.catalog.products(), self.top);
                writeln!(out, "{}", chart::render(&ranking, self.top))?;
            }
            Command::Rate => {
                self.view = View::Home;
                let spinner = ui::new_spinner(&format!("Fetching {} rate...", self.pair));
                let quote = fetch_rate(self.provider.as_ref(), &self.pair).await;
                spinner.finish_and_clear();
                writeln!(out, "{}", rate::render(quote.as_ref(), &self.pair))?;
            }
            Command::Help => writeln!(out, "{HELP}")?,
            Command::Quit | Command::Nothing => {}
        }
        Ok(())
    }

    /// Enters the list view, replacing (and abandoning) any previous
    /// activation's rate.
    async fn activate_list(&mut self) {
        let mut slot = RateSlot::spawn(Arc::clone(&self.provider), self.pair.clone());
        let spinner = ui::new_spinner(&format!("Fetching {} rate...", self.pair));
        slot.settle().await;
        spinner.finish_and_clear();
        self.view = View::List(slot);
    }

    fn render_list<W: Write>(&mut self, out: &mut W) -> Result<()> {
        if let View::List(slot) = &mut self.view {
            let state = slot.state();
            writeln!(out, "{}", list::render(&self.catalog, state, &self.pair))?;
        }
        Ok(())
    }

    /// Re-renders the list after a change, reusing the current activation's
    /// rate. Does nothing outside the list view.
    fn refresh_list<W: Write>(&mut self, out: &mut W) -> Result<()> {
        if matches!(self.view, View::List(_)) {
            writeln!(out, "{}", ui::separator())?;
            self.render_list(out)?;
        }
        Ok(())
    }

    /// Runs the add-product form. Returns whether a product was stored.
    async fn add_product<R, W>(&mut self, lines: &mut Lines<R>, out: &mut W) -> Result<bool>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        writeln!(out, "{}", ui::style_text("Add product", ui::StyleType::Title))?;
        let mut form = ProductForm::default();
        let fields: [(&str, &mut String); 4] = [
            ("Product name", &mut form.name),
            ("Quantity", &mut form.quantity),
            ("Price in euros", &mut form.price_euro),
            ("Export destination", &mut form.destination),
        ];
        for (label, value) in fields {
            write!(out, "{label}: ")?;
            out.flush()?;
            match lines.next_line().await.context("Failed to read input")? {
                Some(line) => *value = line,
                None => {
                    writeln!(out)?;
                    return Ok(false);
                }
            }
        }

        match form.submit(self.input_mode) {
            Ok(product) => {
                let name = product.name.clone();
                let id = self.catalog.append(product);
                writeln!(
                    out,
                    "{}",
                    ui::style_text(
                        &format!("Product saved: {name} (id {id})"),
                        ui::StyleType::Success
                    )
                )?;
                Ok(true)
            }
            Err(e) => {
                writeln!(
                    out,
                    "{}",
                    ui::style_text(
                        &format!("Product not saved: {e}"),
                        ui::StyleType::Error
                    )
                )?;
                Ok(false)
            }
        }
    }
}
