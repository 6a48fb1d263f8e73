//! Interactive menu driving a [`Session`]
//!
//! Input is any `BufRead` so the loop can be driven from tests. End of input
//! is treated as a quit.
//!
//! The first guarded operation takes over Ctrl-C for the rest of the
//! process: from then on Ctrl-C only cancels a running operation and is
//! ignored at the prompts, so leaving takes `q` or end of input.

use crate::error::SessionError;
use crate::reporting::{Event, Sink};
use crate::sqli::oracle::Oracle;
use crate::sqli::session::Session;
use std::future::Future;
use std::io::BufRead;
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Choice {
    DatabaseName,
    Banner,
    Schema,
    Dump,
    Quit,
    Invalid(String),
}

impl Choice {
    pub fn parse(input: &str) -> Self {
        match input.trim().to_lowercase().as_str() {
            "1" => Choice::DatabaseName,
            "2" => Choice::Banner,
            "3" => Choice::Schema,
            "4" => Choice::Dump,
            "q" | "quit" => Choice::Quit,
            other => Choice::Invalid(other.to_string()),
        }
    }
}

fn options() -> Vec<(String, String)> {
    [
        ("1", "Extract the database name"),
        ("2", "Extract the DBMS banner and detect its type"),
        ("3", "List tables and columns"),
        ("4", "Dump the contents of a table"),
        ("q", "Quit"),
    ]
    .iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

/// Runs `op` until it completes, Ctrl-C is pressed or `limit` elapses.
///
/// Dropping the future aborts the in-flight probe; the session cache keeps
/// whatever was stored before that point.
pub async fn guarded<T, F>(op: F, limit: Option<Duration>) -> Result<T, SessionError>
where
    F: Future<Output = Result<T, SessionError>>,
{
    let bounded = async {
        match limit {
            Some(limit) => tokio::time::timeout(limit, op)
                .await
                .map_err(|_| SessionError::TimedOut(limit.as_secs()))?,
            None => op.await,
        }
    };

    tokio::select! {
        result = bounded => result,
        Ok(()) = tokio::signal::ctrl_c() => {
            tracing::warn!("[MENU] operation interrupted");
            Err(SessionError::Cancelled)
        }
    }
}

pub struct Menu<O, R> {
    session: Session<O>,
    input: R,
    sink: Arc<dyn Sink>,
    op_timeout: Option<Duration>,
}

impl<O: Oracle, R: BufRead> Menu<O, R> {
    pub fn new(session: Session<O>, input: R, op_timeout: Option<Duration>) -> Self {
        let sink = session.sink();
        Self {
            session,
            input,
            sink,
            op_timeout,
        }
    }

    pub fn session(&self) -> &Session<O> {
        &self.session
    }

    /// Prompts and reads one trimmed line; `None` at end of input.
    fn ask(&mut self, label: &str) -> anyhow::Result<Option<String>> {
        self.sink.prompt(label);
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    pub async fn run(&mut self) -> anyhow::Result<()> {
        loop {
            self.sink.render(&Event::Menu { options: options() });

            let Some(answer) = self.ask("Your choice")? else {
                break;
            };

            match Choice::parse(&answer) {
                Choice::Quit => break,
                Choice::Invalid(raw) => {
                    self.sink
                        .render(&Event::warn(format!("Invalid choice '{}'.", raw)));
                }
                choice => {
                    if !self.handle(choice).await? {
                        break;
                    }
                }
            }
        }

        self.sink.render(&Event::info("Goodbye."));
        Ok(())
    }

    /// Returns `false` when input ended mid-operation.
    async fn handle(&mut self, choice: Choice) -> anyhow::Result<bool> {
        let result = match choice {
            Choice::DatabaseName => self.database_name().await,
            Choice::Banner => self.banner().await,
            Choice::Schema => self.schema().await,
            Choice::Dump => match self.dump().await? {
                Some(result) => result,
                None => return Ok(false),
            },
            Choice::Quit | Choice::Invalid(_) => Ok(()),
        };

        if let Err(err) = result {
            tracing::debug!("[MENU] {:?}", err);
            self.sink.render(&Event::warn(capitalize(&err.to_string())));
        }
        Ok(true)
    }

    async fn database_name(&mut self) -> Result<(), SessionError> {
        if let Some(name) = self.session.cache().database() {
            self.sink.render(&Event::Database {
                name: name.to_string(),
                cached: true,
            });
            return Ok(());
        }

        let session = &mut self.session;
        let name = guarded(
            async { Ok::<_, SessionError>(session.database_name().await) },
            self.op_timeout,
        )
        .await?;
        if let Some(name) = name {
            self.sink.render(&Event::Database {
                name,
                cached: false,
            });
        }
        Ok(())
    }

    async fn banner(&mut self) -> Result<(), SessionError> {
        if let Some(info) = self.session.cache().dialect() {
            self.sink.render(&Event::Banner {
                info: info.clone(),
                cached: true,
            });
            return Ok(());
        }

        let session = &mut self.session;
        let info = guarded(
            async { Ok::<_, SessionError>(session.banner().await) },
            self.op_timeout,
        )
        .await?;
        self.sink.render(&Event::Banner {
            info,
            cached: false,
        });
        Ok(())
    }

    async fn schema(&mut self) -> Result<(), SessionError> {
        let tables = guarded(self.session.list_tables_and_columns(), self.op_timeout).await?;
        self.sink.render(&Event::Schema { tables });
        Ok(())
    }

    /// `None` when input ended at the table prompt.
    async fn dump(&mut self) -> anyhow::Result<Option<Result<(), SessionError>>> {
        let tables = match guarded(self.session.tables(), self.op_timeout).await {
            Ok(tables) => tables,
            Err(err) => return Ok(Some(Err(err))),
        };
        self.sink.render(&Event::Tables { tables });

        let Some(answer) = self.ask("Table number to dump")? else {
            return Ok(None);
        };
        let Ok(position) = answer.parse::<usize>() else {
            self.sink
                .render(&Event::warn(format!("Invalid table number '{}'.", answer)));
            return Ok(Some(Ok(())));
        };

        let result = guarded(self.session.dump_table(position), self.op_timeout)
            .await
            .map(|dump| {
                tracing::info!(
                    "[MENU] dumped {} row(s) from '{}'",
                    dump.rows.len(),
                    dump.table
                );
            });
        Ok(Some(result))
    }
}

fn capitalize(message: &str) -> String {
    let mut chars = message.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
