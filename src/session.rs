//! Interactive browse session.
//!
//! The session owns the current `FilterState` and borrows the catalog. Each
//! command that changes an input replaces the state and recomputes the view
//! synchronously with [`filter`]; there is no cached result to invalidate.

use crate::catalog::{Catalog, Facet, FacetFilter};
use crate::facets::FacetOptions;
use crate::filter::{ActiveFilter, FilterKind, FilterState, filter};
use crate::view::{RecordCard, RecordDetail, ResultSummary};
use anyhow::{Context, Result, anyhow, bail};
use std::io::{BufRead, Write};

const HELP: &str = "\
Commands:
  search <text>                 set the search term (empty clears it)
  diet <value|all>              constrain the diet
  period <value|all>            constrain the period
  clear [search|diet|period|all]
  show <name>                   detail view for one record
  facets                        list diet and period options
  list                          redraw the current results
  help
  quit";

#[derive(Clone, Debug, Eq, PartialEq)]
/// One parsed input line.
pub enum SessionCommand {
    Search(String),
    SetFacet(Facet, FacetFilter),
    Clear(Option<FilterKind>),
    Show(String),
    Facets,
    List,
    Help,
    Quit,
}

impl SessionCommand {
    /// Parse a line. Arguments are taken verbatim after the first space.
    pub fn parse(line: &str) -> Result<Self> {
        let line = line.trim_end_matches(['\r', '\n']);
        let (verb, rest) = match line.trim_start().split_once(' ') {
            Some((verb, rest)) => (verb, rest),
            None => (line.trim(), ""),
        };
        let command = match verb {
            "search" => SessionCommand::Search(rest.to_string()),
            "diet" | "period" => {
                let facet = Facet::parse(verb).ok_or_else(|| anyhow!("unknown facet {verb}"))?;
                let value = rest.trim();
                if value.is_empty() {
                    bail!("{verb} requires a value (or 'all')");
                }
                SessionCommand::SetFacet(facet, FacetFilter::parse(value))
            }
            "clear" => match rest.trim() {
                "" | "all" => SessionCommand::Clear(None),
                other => SessionCommand::Clear(Some(
                    FilterKind::parse(other)
                        .ok_or_else(|| anyhow!("cannot clear '{other}' (search|diet|period|all)"))?,
                )),
            },
            "show" => {
                let name = rest.trim();
                if name.is_empty() {
                    bail!("show requires a record name");
                }
                SessionCommand::Show(name.to_string())
            }
            "facets" => SessionCommand::Facets,
            "list" | "" => SessionCommand::List,
            "help" | "?" => SessionCommand::Help,
            "quit" | "exit" => SessionCommand::Quit,
            other => bail!("unknown command '{other}' (try 'help')"),
        };
        Ok(command)
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
/// The result grid for the current state.
pub struct ResultsView {
    pub summary: ResultSummary,
    pub active_filters: Vec<ActiveFilter>,
    pub cards: Vec<RecordCard>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
/// What a command produced.
pub enum Outcome {
    Results(ResultsView),
    Detail(Box<RecordDetail>),
    NotFound(String),
    Facets(FacetOptions),
    Help,
    Quit,
}

/// Browse state over an injected, read-only catalog.
pub struct ExplorerSession<'c> {
    catalog: &'c Catalog,
    options: FacetOptions,
    state: FilterState,
}

impl<'c> ExplorerSession<'c> {
    pub fn new(catalog: &'c Catalog) -> Self {
        Self::with_state(catalog, FilterState::default())
    }

    pub fn with_state(catalog: &'c Catalog, state: FilterState) -> Self {
        Self {
            catalog,
            options: FacetOptions::from_records(catalog),
            state,
        }
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    pub fn options(&self) -> &FacetOptions {
        &self.options
    }

    /// Recompute the result grid from the catalog and the current state.
    pub fn results(&self) -> ResultsView {
        let visible = filter(self.catalog, &self.state);
        ResultsView {
            summary: ResultSummary::new(visible.len()),
            active_filters: self.state.active_filters(),
            cards: visible.into_iter().map(RecordCard::from_record).collect(),
        }
    }

    pub fn apply(&mut self, command: SessionCommand) -> Outcome {
        let state = std::mem::take(&mut self.state);
        self.state = match command {
            SessionCommand::Search(term) => state.with_search(term),
            SessionCommand::SetFacet(facet, value) => state.with_facet(facet, value),
            SessionCommand::Clear(Some(kind)) => state.clear(kind),
            SessionCommand::Clear(None) => FilterState::default(),
            SessionCommand::List => state,
            SessionCommand::Show(name) => {
                self.state = state;
                return match self.catalog.find(&name) {
                    Some(record) => Outcome::Detail(Box::new(RecordDetail::from_record(record))),
                    None => Outcome::NotFound(name),
                };
            }
            SessionCommand::Facets => {
                self.state = state;
                return Outcome::Facets(self.options.clone());
            }
            SessionCommand::Help => {
                self.state = state;
                return Outcome::Help;
            }
            SessionCommand::Quit => {
                self.state = state;
                return Outcome::Quit;
            }
        };
        tracing::debug!(state = ?self.state, "filter state replaced");
        Outcome::Results(self.results())
    }
}

/// Write an outcome as plain text.
pub fn render<W: Write>(out: &mut W, outcome: &Outcome) -> Result<()> {
    match outcome {
        Outcome::Results(view) => {
            if !view.active_filters.is_empty() {
                let chips: Vec<String> =
                    view.active_filters.iter().map(ToString::to_string).collect();
                writeln!(out, "Active filters: {}", chips.join(", "))?;
            }
            writeln!(out, "{}", view.summary)?;
            for card in &view.cards {
                writeln!(out, "{card}")?;
            }
            if let Some(hint) = view.summary.empty_hint() {
                for line in hint {
                    writeln!(out, "{line}")?;
                }
            }
        }
        Outcome::Detail(detail) => writeln!(out, "{detail}")?,
        Outcome::NotFound(name) => writeln!(out, "No dinosaur named '{name}'")?,
        Outcome::Facets(options) => {
            for facet in [Facet::Diet, Facet::Period] {
                writeln!(out, "{}: {}", facet.label(), options.choices(facet).join(", "))?;
            }
        }
        Outcome::Help => writeln!(out, "{HELP}")?,
        Outcome::Quit => {}
    }
    Ok(())
}

/// Drive a session from line input until `quit` or end of input.
///
/// Bad commands are reported on `out` and the loop continues; only I/O
/// failures end the session early.
pub fn run_session<R: BufRead, W: Write>(
    session: &mut ExplorerSession<'_>,
    input: R,
    out: &mut W,
) -> Result<()> {
    render(out, &Outcome::Results(session.results()))?;
    let mut commands = 0usize;
    for line in input.lines() {
        let line = line.context("reading session input")?;
        commands += 1;
        let outcome = match SessionCommand::parse(&line) {
            Ok(command) => session.apply(command),
            Err(err) => {
                writeln!(out, "error: {err}")?;
                continue;
            }
        };
        render(out, &outcome)?;
        if outcome == Outcome::Quit {
            break;
        }
        out.flush()?;
    }
    tracing::info!(commands, "browse session finished");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogRecord;
    use std::io::Cursor;

    fn catalog() -> Catalog {
        Catalog::from_records(vec![
            CatalogRecord::new(
                "Velociraptor",
                "Late Cretaceous",
                "Carnivore",
                "dromaeosaurid",
            ),
            CatalogRecord::new("Triceratops", "Late Cretaceous", "Herbivore", "ceratopsid"),
        ])
    }

    #[test]
    fn parses_commands_verbatim() {
        assert_eq!(
            SessionCommand::parse("search  Rex ").unwrap(),
            SessionCommand::Search(" Rex ".to_string())
        );
        assert_eq!(
            SessionCommand::parse("period Late Cretaceous").unwrap(),
            SessionCommand::SetFacet(Facet::Period, FacetFilter::from("Late Cretaceous"))
        );
        assert_eq!(
            SessionCommand::parse("diet all").unwrap(),
            SessionCommand::SetFacet(Facet::Diet, FacetFilter::All)
        );
        assert_eq!(
            SessionCommand::parse("search").unwrap(),
            SessionCommand::Search(String::new())
        );
        assert_eq!(
            SessionCommand::parse("clear diet").unwrap(),
            SessionCommand::Clear(Some(FilterKind::Diet))
        );
        assert!(SessionCommand::parse("diet").is_err());
        assert!(SessionCommand::parse("roar").is_err());
    }

    #[test]
    fn herbivore_filter_selects_triceratops() {
        let catalog = catalog();
        let mut session = ExplorerSession::new(&catalog);
        let Outcome::Results(view) =
            session.apply(SessionCommand::SetFacet(Facet::Diet, "Herbivore".into()))
        else {
            panic!("expected results");
        };
        assert_eq!(view.cards.len(), 1);
        assert_eq!(view.cards[0].name, "Triceratops");
        assert_eq!(view.active_filters, [ActiveFilter::Diet("Herbivore".into())]);
        assert_eq!(catalog.len(), 2, "catalog untouched");
    }

    #[test]
    fn show_does_not_change_state() {
        let catalog = catalog();
        let mut session = ExplorerSession::new(&catalog);
        session.apply(SessionCommand::Search("raptor".into()));
        let before = session.state().clone();
        assert!(matches!(
            session.apply(SessionCommand::Show("Triceratops".into())),
            Outcome::Detail(_)
        ));
        assert_eq!(
            session.apply(SessionCommand::Show("Nessie".into())),
            Outcome::NotFound("Nessie".into())
        );
        assert_eq!(session.state(), &before);
    }

    #[test]
    fn run_session_reports_errors_and_stops_on_quit() {
        let catalog = catalog();
        let mut session = ExplorerSession::new(&catalog);
        let input = Cursor::new("search zzz\nroar\nclear\nquit\nsearch never\n");
        let mut out = Vec::new();
        run_session(&mut session, input, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("2 dinosaurs found"));
        assert!(text.contains("Active filters: Search: \"zzz\""));
        assert!(text.contains("0 dinosaurs found\nNo dinosaurs found"));
        assert!(text.contains("error: unknown command 'roar'"));
        assert!(session.state().is_unconstrained());
    }
}
