use std::path::PathBuf;
use std::sync::{mpsc, Arc};

use alerts_core::{Effect, LoadOutcome, Msg};
use alerts_engine::{export_alert, EngineEvent, EngineHandle, EventSink};
use alerts_logging::{alert_info, alert_warn};
use anyhow::Context;

use super::app::AppInput;
use super::config::AppConfig;
use super::ui::render::render_card;

/// What the loop should tell the user after running effects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The search list's completion callback fired.
    Loaded(LoadOutcome),
    /// The modal closed; the screen underneath needs redrawing.
    NavigatedBack,
    Exported(PathBuf),
    ExportFailed(String),
}

pub struct EffectRunner {
    engine: EngineHandle,
    export_dir: PathBuf,
}

impl EffectRunner {
    pub fn new(config: &AppConfig, input_tx: mpsc::Sender<AppInput>) -> anyhow::Result<Self> {
        let sink = Arc::new(InputSink { tx: input_tx });
        let engine = EngineHandle::new(config.fetch_settings(), config.endpoints()?, sink)
            .context("starting the fetch engine")?;
        Ok(Self {
            engine,
            export_dir: config.export_dir.clone(),
        })
    }

    pub fn run(&self, effects: Vec<Effect>) -> Vec<Outcome> {
        let mut outcomes = Vec::new();
        for effect in effects {
            match effect {
                Effect::LookupAlert {
                    request_id,
                    alert_id,
                } => {
                    alert_info!("LookupAlert request_id={} alert_id={}", request_id, alert_id);
                    self.engine.lookup(request_id, alert_id);
                }
                Effect::SearchAlerts { request_id, query } => {
                    alert_info!("SearchAlerts request_id={} query={:?}", request_id, query);
                    self.engine.search(request_id, query);
                }
                Effect::NotifyLoaded(outcome) => outcomes.push(Outcome::Loaded(outcome)),
                Effect::NavigateBack => outcomes.push(Outcome::NavigatedBack),
                Effect::ExportAlert(view) => {
                    let rendered = render_card(&view);
                    match export_alert(&self.export_dir, &view.headline, &view.id, &rendered) {
                        Ok(path) => outcomes.push(Outcome::Exported(path)),
                        Err(err) => {
                            alert_warn!("export of {} failed: {}", view.id, err);
                            outcomes.push(Outcome::ExportFailed(err.to_string()));
                        }
                    }
                }
            }
        }
        outcomes
    }
}

struct InputSink {
    tx: mpsc::Sender<AppInput>,
}

impl EventSink for InputSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(AppInput::Msg(engine_msg(event)));
    }
}

/// Engine completions become core messages; failures keep only their text.
pub fn engine_msg(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::LookupCompleted { request_id, result } => Msg::LookupCompleted {
            request_id,
            result: result.map_err(|err| err.to_string()),
        },
        EngineEvent::SearchCompleted { request_id, result } => Msg::SearchCompleted {
            request_id,
            result: result.map_err(|err| err.to_string()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alerts_core::SearchResult;
    use tempfile::TempDir;

    fn runner(export_dir: PathBuf) -> (EffectRunner, mpsc::Receiver<AppInput>) {
        let (tx, rx) = mpsc::channel();
        let config = AppConfig {
            api_base: "http://127.0.0.1:9/function".to_string(),
            export_dir,
            ..AppConfig::default()
        };
        (EffectRunner::new(&config, tx).unwrap(), rx)
    }

    #[test]
    fn engine_events_become_messages() {
        let msg = engine_msg(EngineEvent::SearchCompleted {
            request_id: 3,
            result: Ok(SearchResult::default()),
        });
        assert_eq!(
            msg,
            Msg::SearchCompleted {
                request_id: 3,
                result: Ok(SearchResult::default()),
            }
        );
    }

    #[test]
    fn local_effects_report_outcomes() {
        let temp = TempDir::new().unwrap();
        let (runner, _rx) = runner(temp.path().to_path_buf());

        let outcomes = runner.run(vec![
            Effect::NotifyLoaded(LoadOutcome::Failed("boom".to_string())),
            Effect::NavigateBack,
        ]);
        assert_eq!(
            outcomes,
            vec![
                Outcome::Loaded(LoadOutcome::Failed("boom".to_string())),
                Outcome::NavigatedBack,
            ]
        );
    }

    #[test]
    fn lookup_failures_come_back_through_the_channel() {
        let temp = TempDir::new().unwrap();
        let (runner, rx) = runner(temp.path().to_path_buf());

        let outcomes = runner.run(vec![Effect::LookupAlert {
            request_id: 9,
            alert_id: "X".to_string(),
        }]);
        assert!(outcomes.is_empty());

        let input = rx
            .recv_timeout(std::time::Duration::from_secs(40))
            .unwrap();
        match input {
            AppInput::Msg(Msg::LookupCompleted { request_id, result }) => {
                assert_eq!(request_id, 9);
                assert!(result.is_err());
            }
            other => panic!("unexpected input {other:?}"),
        }
    }
}
