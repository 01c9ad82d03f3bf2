// File: operator-grid/src/registry.rs
// Purpose: The console: every grid of the session plus the collaborators they report to

use futures::future::join_all;
use maud::Markup;
use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::sync::Arc;

use crate::command::{Command, Effect, Notice, Outgoing, Response};
use crate::config::GridConfig;
use crate::controller::GridController;
use crate::error::{GridError, Result};
use crate::gateway::{execute, Gateway};
use crate::i18n::{Dialog, Translate};
use crate::kind::RecordKind;
use crate::render::render_table;

/// Title key of the notice dialog
pub const NOTICE_TITLE_KEY: &str = "errors.admin.tables.title";

/// One controller per record kind, created once for the whole session
#[derive(Debug)]
pub struct GridRegistry {
    grids: BTreeMap<RecordKind, GridController>,
}

impl GridRegistry {
    pub fn new(config: &GridConfig) -> Self {
        let grids = RecordKind::ALL
            .iter()
            .map(|&kind| (kind, GridController::new(kind, config.rows_per_page)))
            .collect();
        Self { grids }
    }

    pub fn get(&self, kind: RecordKind) -> Option<&GridController> {
        self.grids.get(&kind)
    }

    pub fn get_mut(&mut self, kind: RecordKind) -> Option<&mut GridController> {
        self.grids.get_mut(&kind)
    }

    pub fn kinds(&self) -> impl Iterator<Item = RecordKind> + '_ {
        self.grids.keys().copied()
    }
}

/// Drives the grids: commands in, requests out, responses back in
pub struct Console {
    gateway: Arc<dyn Gateway>,
    dialog: Box<dyn Dialog>,
    translator: Arc<dyn Translate>,
    grids: GridRegistry,
    dirty: BTreeSet<RecordKind>,
    notice_open: bool,
}

impl Console {
    pub fn new(
        gateway: Arc<dyn Gateway>,
        dialog: Box<dyn Dialog>,
        translator: Arc<dyn Translate>,
        config: &GridConfig,
    ) -> Self {
        tracing::debug!(backend = gateway.name(), rows_per_page = config.rows_per_page, "console created");
        Self {
            gateway,
            dialog,
            translator,
            grids: GridRegistry::new(config),
            dirty: BTreeSet::new(),
            notice_open: false,
        }
    }

    /// Console talking HTTP, with the catalog named by the config
    #[cfg(feature = "http")]
    pub fn from_config(config: &crate::config::Config, dialog: Box<dyn Dialog>) -> anyhow::Result<Self> {
        use crate::gateway::http::HttpGateway;
        use crate::i18n::Catalog;

        let gateway = HttpGateway::new(&config.gateway)?;
        let catalog = Catalog::load(&config.ui.catalog_dir, &config.ui.language)?;
        Ok(Self::new(
            Arc::new(gateway),
            dialog,
            Arc::new(catalog),
            &config.grid,
        ))
    }

    pub fn grids(&self) -> &GridRegistry {
        &self.grids
    }

    pub fn grid(&self, kind: RecordKind) -> Option<&GridController> {
        self.grids.get(kind)
    }

    /// Fetch the first page of every grid
    pub async fn start(&mut self) -> Result<()> {
        let kinds: Vec<_> = self.grids.kinds().collect();
        for kind in kinds {
            self.dispatch(kind, Command::LoadPage).await?;
        }
        Ok(())
    }

    /// Handle one operator command and every request it leads to.
    /// A notice still on screen is dismissed first.
    pub async fn dispatch(&mut self, kind: RecordKind, command: Command) -> Result<()> {
        let grid = self
            .grids
            .get_mut(kind)
            .ok_or_else(|| GridError::UnknownKind(kind.to_string()))?;
        let effects = grid.handle(command);
        self.dismiss_notice();
        self.run(kind, effects).await;
        Ok(())
    }

    /// Grids whose markup changed since the last call
    pub fn take_dirty(&mut self) -> Vec<RecordKind> {
        std::mem::take(&mut self.dirty).into_iter().collect()
    }

    pub fn render(&self, kind: RecordKind) -> Option<Markup> {
        self.grids
            .get(kind)
            .map(|grid| render_table(grid.state(), self.translator.as_ref()))
    }

    async fn run(&mut self, kind: RecordKind, effects: Vec<Effect>) {
        let mut queue: VecDeque<(RecordKind, Effect)> =
            effects.into_iter().map(|e| (kind, e)).collect();

        loop {
            let mut outgoing: Vec<Outgoing> = Vec::new();

            while let Some((kind, effect)) = queue.pop_front() {
                match effect {
                    Effect::Send(out) => outgoing.push(out),
                    Effect::Notify(notice) => self.notify(&notice),
                    Effect::Reload(other) => {
                        if let Some(grid) = self.grids.get_mut(other) {
                            queue.extend(grid.load_page().into_iter().map(|e| (other, e)));
                        }
                    }
                    Effect::Rerender => {
                        self.dirty.insert(kind);
                    }
                }
            }

            if outgoing.is_empty() {
                break;
            }

            let responses = join_all(outgoing.into_iter().map(|out| {
                let gateway = Arc::clone(&self.gateway);
                async move {
                    let outcome = execute(gateway.as_ref(), &out.request).await;
                    Response::new(out.ticket, outcome)
                }
            }))
            .await;

            for response in responses {
                let kind = response.ticket.kind;
                if let Some(grid) = self.grids.get_mut(kind) {
                    queue.extend(grid.apply(response).into_iter().map(|e| (kind, e)));
                }
            }
        }
    }

    fn notify(&mut self, notice: &Notice) {
        let title = self.translator.translate(NOTICE_TITLE_KEY, &[]);
        let content = self
            .translator
            .translate(notice.error.notice_key(), &notice.error.notice_params());
        tracing::debug!(kind = %notice.kind, error = %notice.error, "notifying operator");
        self.dismiss_notice();
        self.dialog.open(&title, &content);
        self.notice_open = true;
    }

    fn dismiss_notice(&mut self) {
        if self.notice_open {
            self.dialog.close();
            self.notice_open = false;
        }
    }
}
