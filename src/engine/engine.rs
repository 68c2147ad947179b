use std::sync::mpsc::{Receiver, Sender};
use std::sync::Arc;
use std::thread;

use tracing::{debug, info, warn};

use crate::engine::content_service::generate_package;
use crate::engine::gateway::Gateway;
use crate::engine::media_flow::run_media_request;
use crate::engine::protocol::{EngineCommand, EngineResponse};

/// Receives commands from the UI and answers on `tx`.
///
/// Each gateway call runs on its own worker thread so a slow media request
/// does not hold up chat replies. Ordering between surfaces is not kept.
pub struct Engine {
    rx: Receiver<EngineCommand>,
    tx: Sender<EngineResponse>,
    gateway: Arc<dyn Gateway>,
    on_response: Arc<dyn Fn() + Send + Sync>,
}

impl Engine {
    pub fn new(
        rx: Receiver<EngineCommand>,
        tx: Sender<EngineResponse>,
        gateway: Arc<dyn Gateway>,
    ) -> Self {
        Self {
            rx,
            tx,
            gateway,
            on_response: Arc::new(|| {}),
        }
    }

    /// Called after every response is sent, e.g. to wake the UI.
    pub fn with_notifier(mut self, notify: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_response = Arc::new(notify);
        self
    }

    pub fn run(&mut self) {
        while let Ok(cmd) = self.rx.recv() {
            match cmd {
                EngineCommand::SetApiKey(key) => {
                    self.gateway.set_api_key(key);
                    info!(has_key = self.gateway.has_credential(), "API key updated");
                }

                EngineCommand::GeneratePackage(input) => {
                    self.spawn(move |gateway, reply| {
                        let response = match generate_package(gateway.as_ref(), &input) {
                            Ok(package) => EngineResponse::PackageReady(package),
                            Err(e) => EngineResponse::PackageRejected(e),
                        };
                        reply(response);
                    });
                }

                EngineCommand::SendChat { message, history } => {
                    self.spawn(move |gateway, reply| {
                        debug!(turns = history.len(), "sending chat message");
                        reply(EngineResponse::ChatReply(gateway.chat(&message, &history)));
                    });
                }

                EngineCommand::RunMedia(request) => {
                    self.spawn(move |gateway, reply| {
                        let outcome = run_media_request(gateway.as_ref(), &request, |phase| {
                            reply(EngineResponse::MediaProgress(phase));
                        });
                        if let Err(e) = &outcome {
                            warn!(error = %e, operation = ?request.operation, "media request failed");
                        }
                        reply(EngineResponse::MediaFinished(outcome));
                    });
                }
            }
        }

        debug!("command channel closed, engine stopping");
    }

    fn spawn<F>(&self, job: F)
    where
        F: FnOnce(Arc<dyn Gateway>, &dyn Fn(EngineResponse)) + Send + 'static,
    {
        let gateway = Arc::clone(&self.gateway);
        let tx = self.tx.clone();
        let notify = Arc::clone(&self.on_response);

        thread::spawn(move || {
            let reply = |response: EngineResponse| {
                let _ = tx.send(response);
                notify();
            };
            job(gateway, &reply);
        });
    }
}

/// Spawns the engine on a background thread.
pub fn start(
    gateway: Arc<dyn Gateway>,
    notify: impl Fn() + Send + Sync + 'static,
) -> (Sender<EngineCommand>, Receiver<EngineResponse>) {
    let (cmd_tx, cmd_rx) = std::sync::mpsc::channel();
    let (resp_tx, resp_rx) = std::sync::mpsc::channel();

    thread::spawn(move || {
        let mut engine = Engine::new(cmd_rx, resp_tx, gateway).with_notifier(notify);
        engine.run();
    });

    (cmd_tx, resp_rx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crate::engine::gateway::fake::ScriptedGateway;
    use crate::engine::gateway::GatewayError;
    use crate::engine::media_flow::MediaRequest;
    use crate::model::event_input::{EventInput, ValidationError};
    use crate::model::media::{AspectRatio, ImageSize, MediaOperation};

    const WAIT: Duration = Duration::from_secs(5);

    #[test]
    fn invalid_input_is_rejected_without_a_gateway_call() {
        let gateway = Arc::new(ScriptedGateway::with_text(Ok("{}".into())));
        let (tx, rx) = start(gateway.clone(), || {});

        tx.send(EngineCommand::GeneratePackage(EventInput::new("", "AI")))
            .unwrap();

        match rx.recv_timeout(WAIT).unwrap() {
            EngineResponse::PackageRejected(e) => assert_eq!(e, ValidationError::MissingName),
            _ => panic!("expected rejection"),
        }
        assert_eq!(gateway.calls(), 0);
    }

    #[test]
    fn chat_reply_is_forwarded() {
        let gateway = Arc::new(ScriptedGateway::with_chat(Ok("Harika fikir!".into())));
        let (tx, rx) = start(gateway, || {});

        tx.send(EngineCommand::SendChat {
            message: "Fikir?".into(),
            history: Vec::new(),
        })
        .unwrap();

        match rx.recv_timeout(WAIT).unwrap() {
            EngineResponse::ChatReply(reply) => assert_eq!(reply.unwrap(), "Harika fikir!"),
            _ => panic!("expected chat reply"),
        }
    }

    #[test]
    fn set_api_key_reaches_the_gateway() {
        let gateway = Arc::new(ScriptedGateway::without_credential());
        let (tx, rx) = start(gateway.clone(), || {});

        tx.send(EngineCommand::SetApiKey("abc".into())).unwrap();
        tx.send(EngineCommand::RunMedia(MediaRequest {
            operation: MediaOperation::Generate,
            prompt: "afiş".into(),
            ratio: AspectRatio::Square,
            size: ImageSize::OneK,
            source: None,
        }))
        .unwrap();

        let mut finished = None;
        while finished.is_none() {
            if let EngineResponse::MediaFinished(outcome) = rx.recv_timeout(WAIT).unwrap() {
                finished = Some(outcome);
            }
        }

        // Credential accepted, so the scripted NoMedia comes back instead.
        assert_eq!(
            finished.unwrap().unwrap_err(),
            crate::engine::media_flow::MediaError::Gateway(GatewayError::NoMedia)
        );
        assert!(gateway.has_credential());
    }
}
