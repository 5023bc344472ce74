use derive_more::Display;

use crate::{
    application::config::ChartConfig,
    domain::{
        chart::{ChartTable, ChartViewer, RATIO_SCHEMA, Row, RowGenerator, TableWorker},
        errors::ChartResult,
        logging::LogComponent,
        market_data::ServerRecord,
    },
    log_debug, log_warn,
};

/// Lifecycle phase of a [`ChartComponent`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ChartPhase {
    #[display(fmt = "unmounted")]
    Unmounted,
    /// Mounted, but the rendering environment could not provide a table
    #[display(fmt = "mounted-no-table")]
    MountedNoTable,
    #[display(fmt = "mounted-with-table")]
    MountedWithTable,
}

enum ChartState<T> {
    Unmounted,
    MountedNoTable,
    MountedWithTable(T),
}

impl<T> ChartState<T> {
    fn phase(&self) -> ChartPhase {
        match self {
            ChartState::Unmounted => ChartPhase::Unmounted,
            ChartState::MountedNoTable => ChartPhase::MountedNoTable,
            ChartState::MountedWithTable(_) => ChartPhase::MountedWithTable,
        }
    }
}

/// Hooks fired by the component as it moves through its lifecycle
pub trait ChartObserver {
    fn on_phase_change(&self, _from: ChartPhase, _to: ChartPhase) {}

    fn on_rows_appended(&self, _rows: &[Row]) {}
}

/// Default observer: traces transitions and alerts in development builds only
pub struct LoggingObserver;

impl ChartObserver for LoggingObserver {
    fn on_phase_change(&self, from: ChartPhase, to: ChartPhase) {
        log_debug!(LogComponent::Application("RatioChart"), "📈 {} -> {}", from, to);
    }

    fn on_rows_appended(&self, rows: &[Row]) {
        #[cfg(debug_assertions)]
        {
            let alerts = rows.iter().filter(|row| row.is_alert()).count();
            if alerts > 0 {
                crate::domain::logging::get_logger().log_with_metadata(
                    crate::domain::logging::LogLevel::Debug,
                    LogComponent::Application("RatioChart"),
                    "🚨 rows outside the band",
                    &format!("{{\"rows\":{},\"alerts\":{}}}", rows.len(), alerts),
                );
            }
        }
        #[cfg(not(debug_assertions))]
        let _ = rows;
    }
}

/// Result of forwarding one batch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// No table; the batch was ignored
    Skipped,
    Appended { rows: usize, alerts: usize },
}

/// Owns the widget's table for one mounted lifetime and feeds it row batches.
///
/// `Unmounted -> MountedNoTable | MountedWithTable -> Unmounted`. The table is
/// created at most once per mount and is dropped on unmount.
pub struct ChartComponent<T: ChartTable> {
    config: ChartConfig,
    generator: RowGenerator,
    state: ChartState<T>,
    observer: Box<dyn ChartObserver>,
}

impl<T: ChartTable> ChartComponent<T> {
    pub fn new(config: ChartConfig) -> Self {
        Self::with_observer(config, Box::new(LoggingObserver))
    }

    pub fn with_observer(config: ChartConfig, observer: Box<dyn ChartObserver>) -> Self {
        Self {
            generator: RowGenerator::new(config.band),
            config,
            state: ChartState::Unmounted,
            observer,
        }
    }

    pub fn phase(&self) -> ChartPhase {
        self.state.phase()
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    pub fn table(&self) -> Option<&T> {
        match &self.state {
            ChartState::MountedWithTable(table) => Some(table),
            _ => None,
        }
    }

    /// Acquire a table from `worker` and attach it to `viewer`.
    ///
    /// A missing worker or a failed table creation leaves the component inert
    /// (`MountedNoTable`); nothing is returned to the caller and nothing is retried.
    /// A missing worker is an expected environment and is not logged.
    /// Mounting an already mounted component does nothing.
    pub fn mount<W, V>(&mut self, worker: Option<&W>, viewer: &V) -> ChartPhase
    where
        W: TableWorker<Table = T>,
        V: ChartViewer<T>,
    {
        if !matches!(self.state, ChartState::Unmounted) {
            log_debug!(
                LogComponent::Application("RatioChart"),
                "mount ignored, already {}",
                self.phase()
            );
            return self.phase();
        }

        let table = match worker.map(|worker| worker.create_table(&RATIO_SCHEMA)) {
            Some(Ok(table)) => table,
            Some(Err(e)) => {
                log_warn!(LogComponent::Application("RatioChart"), "⚠️ Table creation failed: {}", e);
                self.transition(ChartState::MountedNoTable);
                return self.phase();
            }
            None => {
                self.transition(ChartState::MountedNoTable);
                return self.phase();
            }
        };

        // The table is ours even if the viewer rejects it or an attribute.
        if let Err(e) = self.attach(&table, viewer) {
            log_warn!(LogComponent::Application("RatioChart"), "⚠️ Viewer setup incomplete: {}", e);
        }
        self.transition(ChartState::MountedWithTable(table));
        self.phase()
    }

    fn attach<V: ChartViewer<T>>(&self, table: &T, viewer: &V) -> ChartResult<()> {
        viewer.load(table)?;
        for (name, value) in self.config.viewer_attributes()? {
            viewer.set_attribute(name, &value)?;
        }
        Ok(())
    }

    /// Map `batch` through the row generator and append it to the table.
    pub fn update(&mut self, batch: &[ServerRecord]) -> ChartResult<UpdateOutcome> {
        let ChartState::MountedWithTable(table) = &self.state else {
            return Ok(UpdateOutcome::Skipped);
        };
        if batch.is_empty() {
            return Ok(UpdateOutcome::Appended { rows: 0, alerts: 0 });
        }

        let rows = self.generator.generate(batch);
        table.update(&rows)?;
        self.observer.on_rows_appended(&rows);

        Ok(UpdateOutcome::Appended {
            rows: rows.len(),
            alerts: rows.iter().filter(|row| row.is_alert()).count(),
        })
    }

    /// Drop the table handle; later updates are skipped until the next mount.
    pub fn unmount(&mut self) {
        if !matches!(self.state, ChartState::Unmounted) {
            self.transition(ChartState::Unmounted);
        }
    }

    fn transition(&mut self, next: ChartState<T>) {
        let from = self.phase();
        self.state = next;
        self.observer.on_phase_change(from, self.phase());
    }
}
