use std::collections::VecDeque;

use tokio::sync::{mpsc, oneshot, watch};
use tracing::{instrument, Instrument};

use crate::{
    adapter::{
        AdapterError, AssetLibrary, AssetUploader, CollectionStore, Credentials, HttpLibrary,
        HttpStore, HttpUploader, Library, MemoryAssets, MemoryStore, StaticToken, Store,
        TokenFile, TokenSource, Uploader,
    },
    config::{AuthConfig, Config},
    model::CollectionPatch,
};

use super::{Command, Intent, Outcome, Request, Session, SessionError, Ticket};

/// The collaborators a session talks to.
#[derive(Debug, Clone)]
pub struct Adapters {
    pub store: Store,
    pub uploader: Uploader,
    pub library: Library,
    pub credentials: Credentials,
}

impl Adapters {
    /// HTTP collaborators at the configured endpoints, sharing one client.
    pub fn from_config(config: &Config) -> Adapters {
        let client = reqwest::Client::new();
        let credentials: Credentials = match &config.auth {
            AuthConfig::None => StaticToken(None).into(),
            AuthConfig::Token(token) => StaticToken(Some(token.clone())).into(),
            AuthConfig::TokenFile(path) => TokenFile::new(path.clone()).into(),
        };
        Adapters {
            store: HttpStore::new(client.clone(), &config.api.base_url, credentials.clone()).into(),
            uploader: HttpUploader::new(client.clone(), &config.api.upload_url).into(),
            library: HttpLibrary::new(client, &config.api.library_url).into(),
            credentials,
        }
    }

    /// In-memory collaborators with a fixed bearer token.
    pub fn in_memory(store: MemoryStore, assets: MemoryAssets) -> Adapters {
        Adapters {
            store: store.into(),
            uploader: assets.clone().into(),
            library: assets.into(),
            credentials: StaticToken(Some("offline".to_owned())).into(),
        }
    }

    #[instrument(skip(self), level = "debug")]
    pub async fn execute(&self, request: Request) -> Outcome {
        match request {
            Request::ListCollections => Outcome::Collections(self.store.list().await),
            Request::CreateCollection(metadata) => {
                Outcome::CollectionSaved(self.store.create(metadata).await)
            }
            Request::UpdateCollection { id, patch } => {
                Outcome::CollectionSaved(self.store.update(&id, patch).await)
            }
            Request::DeleteCollection(id) => {
                let result = self.store.delete(&id).await;
                Outcome::CollectionDeleted { id, result }
            }
            Request::PersistItems {
                id,
                items,
                mutation,
            } => Outcome::ItemsPersisted {
                mutation,
                result: self
                    .store
                    .update(&id, CollectionPatch::Items { items })
                    .await,
            },
            Request::ListAssets => {
                let result = match self.credentials.bearer().await {
                    Some(bearer) => self.library.list_assets(&bearer).await,
                    None => Err(AdapterError::MissingCredential),
                };
                Outcome::Assets(result)
            }
            Request::Upload { target, file } => {
                let result = match self.credentials.bearer().await {
                    Some(bearer) => self.uploader.upload(file, &bearer).await,
                    None => Err(AdapterError::MissingCredential),
                };
                Outcome::Uploaded { target, result }
            }
        }
    }
}

/// Runs `commands` one after another, feeding every outcome back into the session and
/// running whatever follow-up commands that produces.
pub async fn run_commands(session: &mut Session, adapters: &Adapters, commands: Vec<Command>) {
    let mut queue: VecDeque<Command> = commands.into();
    while let Some(Command { ticket, request }) = queue.pop_front() {
        let outcome = adapters.execute(request).await;
        queue.extend(session.complete(ticket, outcome));
    }
}

/// Dispatches `intent` and waits for every resulting request, follow-ups included.
pub async fn run_intent(
    session: &mut Session,
    adapters: &Adapters,
    intent: Intent,
) -> Result<(), SessionError> {
    let commands = session.dispatch(intent)?;
    run_commands(session, adapters, commands).await;
    Ok(())
}

/// Published after every change to the session.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub session: Session,
    /// Requests started but not yet completed
    pub in_flight: usize,
}

#[derive(Debug)]
enum SessionMessage {
    Intent {
        intent: Intent,
        reply: oneshot::Sender<Result<(), SessionError>>,
    },
    Shutdown,
}

/// Runs a session in its own task. Requests run concurrently, each in a task of its own,
/// so a slow request never holds up the operator. Stale results are sorted out by the
/// session's tickets.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    send: mpsc::UnboundedSender<SessionMessage>,
    snapshots: watch::Receiver<Snapshot>,
}

impl SessionHandle {
    pub fn new(mut session: Session, adapters: Adapters) -> SessionHandle {
        let (send, recv) = mpsc::unbounded_channel();
        let commands = session.start();
        let (snapshot_send, snapshots) = watch::channel(Snapshot {
            session: session.clone(),
            in_flight: commands.len(),
        });
        tokio::spawn(
            run_session(session, adapters, commands, recv, snapshot_send)
                .instrument(tracing::info_span!("session")),
        );
        SessionHandle { send, snapshots }
    }

    /// Hands `intent` to the session. Returns once it was dispatched, not once the requests
    /// it started have finished, see `settled` for that.
    pub async fn dispatch(&self, intent: Intent) -> eyre::Result<Result<(), SessionError>> {
        let (reply, reply_recv) = oneshot::channel();
        self.send
            .send(SessionMessage::Intent { intent, reply })
            .map_err(|_| eyre::eyre!("session task is gone"))?;
        Ok(reply_recv.await?)
    }

    pub fn snapshot(&self) -> Snapshot {
        self.snapshots.borrow().clone()
    }

    /// Waits until no request is in flight and returns that state.
    pub async fn settled(&self) -> eyre::Result<Snapshot> {
        let mut snapshots = self.snapshots.clone();
        let snapshot = snapshots.wait_for(|snapshot| snapshot.in_flight == 0).await?;
        Ok(snapshot.clone())
    }

    pub fn shutdown(&self) -> eyre::Result<()> {
        self.send
            .send(SessionMessage::Shutdown)
            .map_err(|_| eyre::eyre!("session task is gone"))?;
        Ok(())
    }
}

struct Runner {
    session: Session,
    adapters: Adapters,
    in_flight: usize,
    outcome_send: mpsc::UnboundedSender<(Ticket, Outcome)>,
    snapshot_send: watch::Sender<Snapshot>,
}

impl Runner {
    fn spawn_commands(&mut self, commands: Vec<Command>) {
        for Command { ticket, request } in commands {
            self.in_flight += 1;
            let adapters = self.adapters.clone();
            let outcome_send = self.outcome_send.clone();
            tokio::spawn(
                async move {
                    let outcome = adapters.execute(request).await;
                    // receiver only goes away on shutdown
                    let _ = outcome_send.send((ticket, outcome));
                }
                .in_current_span(),
            );
        }
    }

    fn on_intent(&mut self, intent: Intent) -> Result<(), SessionError> {
        let commands = self.session.dispatch(intent).map_err(|err| {
            tracing::debug!(%err, "intent rejected");
            err
        })?;
        self.spawn_commands(commands);
        Ok(())
    }

    fn on_outcome(&mut self, ticket: Ticket, outcome: Outcome) {
        self.in_flight -= 1;
        let commands = self.session.complete(ticket, outcome);
        self.spawn_commands(commands);
    }

    fn publish(&self) {
        self.snapshot_send.send_replace(Snapshot {
            session: self.session.clone(),
            in_flight: self.in_flight,
        });
    }
}

async fn run_session(
    session: Session,
    adapters: Adapters,
    start_commands: Vec<Command>,
    mut recv: mpsc::UnboundedReceiver<SessionMessage>,
    snapshot_send: watch::Sender<Snapshot>,
) {
    let (outcome_send, mut outcome_recv) = mpsc::unbounded_channel::<(Ticket, Outcome)>();
    let mut runner = Runner {
        session,
        adapters,
        in_flight: 0,
        outcome_send,
        snapshot_send,
    };
    runner.spawn_commands(start_commands);
    loop {
        tokio::select! {
            msg = recv.recv() => {
                match msg {
                    Some(SessionMessage::Intent { intent, reply }) => {
                        let result = runner.on_intent(intent);
                        // publish before replying so a caller waiting on `settled` sees
                        // the requests this intent started
                        runner.publish();
                        let _ = reply.send(result);
                    }
                    Some(SessionMessage::Shutdown) | None => {
                        tracing::info!(in_flight = runner.in_flight, "shutting down session");
                        break;
                    }
                }
            }
            Some((ticket, outcome)) = outcome_recv.recv() => {
                runner.on_outcome(ticket, outcome);
                runner.publish();
            }
        }
    }
}
