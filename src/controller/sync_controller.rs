// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Sync controller: lifecycle, command glue and notification.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;

use super::config::{SerialSettings, SyncConfig};
use super::session::{Session, SessionSink};
use crate::arbiter::{Arbiter, Directive, Event, Source};
use crate::command::Command;
use crate::cue::{Cue, CueInterpreter, ExternalObserver};
use crate::error::{Error, Result, TransportError};
use crate::event::{EventBus, Notifier, SyncEvent};
use crate::protocol::{SerialLink, Transport};
use crate::response::{self, Reading};
use crate::scheduler::{self, PollTask};
use crate::state::{ConnectionPhase, DeviceState, StateChange};
use crate::types::{Color, IreLevel, Model, Pattern, PowerState, Resolution};

/// Keeps one generator in sync with the user and the measurement tool.
///
/// The controller is cheap to clone; clones share the same state, session
/// and subscribers. Dropping the last clone stops every background task.
///
/// User commands are sent first and committed only if the write
/// succeeded, so a failed send never leaves the state claiming something
/// the generator was not told.
pub struct SyncController<T: Transport> {
    inner: Arc<Inner<T>>,
}

/// Shared controller state.
pub(crate) struct Inner<T: Transport> {
    config: SyncConfig,
    arbiter: Mutex<Arbiter>,
    interpreter: CueInterpreter,
    events: EventBus,
    snapshot: watch::Sender<DeviceState>,
    notifiers: RwLock<Vec<Arc<dyn Notifier>>>,
    session: Mutex<Option<Session<T>>>,
    tracking: Mutex<Option<Tracking>>,
    /// Held from commit through delivery, so notifiers and the bus see
    /// commits in the order they happened.
    delivery: Mutex<()>,
    /// Serializes connect and disconnect.
    lifecycle: tokio::sync::Mutex<()>,
}

struct Tracking {
    stop: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl<T: Transport> SyncController<T> {
    /// Creates a controller with the default timings.
    #[must_use]
    pub fn new() -> Self {
        Self::build(SyncConfig::default())
    }

    /// Creates a controller with custom timings.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Value`] if a period or the event capacity is zero
    /// (see [`SyncConfig::validate`]).
    pub fn with_config(config: SyncConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: SyncConfig) -> Self {
        let events = EventBus::with_capacity(config.event_capacity);
        Self {
            inner: Arc::new(Inner {
                config,
                arbiter: Mutex::new(Arbiter::new()),
                interpreter: CueInterpreter::new(),
                events,
                snapshot: watch::channel(DeviceState::new()).0,
                notifiers: RwLock::new(Vec::new()),
                session: Mutex::new(None),
                tracking: Mutex::new(None),
                delivery: Mutex::new(()),
                lifecycle: tokio::sync::Mutex::new(()),
            }),
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &SyncConfig {
        &self.inner.config
    }

    // =========================================================================
    // Observation
    // =========================================================================

    /// Returns a snapshot of the current state.
    #[must_use]
    pub fn state(&self) -> DeviceState {
        self.inner.arbiter.lock().snapshot()
    }

    /// Returns a receiver that always holds the latest state.
    #[must_use]
    pub fn watch(&self) -> watch::Receiver<DeviceState> {
        self.inner.snapshot.subscribe()
    }

    /// Subscribes to sync events.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<SyncEvent> {
        self.inner.events.subscribe()
    }

    /// Returns the number of active event subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner.events.subscriber_count()
    }

    /// Registers a notifier for state snapshots and status lines.
    pub fn add_notifier(&self, notifier: Arc<dyn Notifier>) {
        self.inner.notifiers.write().push(notifier);
    }

    // =========================================================================
    // Connection Management
    // =========================================================================

    /// Connects over an already-open transport.
    ///
    /// See [`connect_with`](Self::connect_with).
    ///
    /// # Errors
    ///
    /// Returns [`Error::AlreadyConnected`] if a session is open, or the
    /// transport error if identification failed on I/O.
    pub async fn connect(&self, transport: T) -> Result<Model> {
        self.connect_with(move |_| std::future::ready(Ok::<T, Error>(transport)))
            .await
    }

    /// Opens the port with `open`, identifies the generator and starts
    /// polling.
    ///
    /// `open` receives the configured [`SerialSettings`]. If the generator
    /// does not answer the identify query in time the model is
    /// [`Model::Unknown`] and the connection still succeeds.
    ///
    /// # Errors
    ///
    /// - [`Error::AlreadyConnected`] if a session is open
    /// - [`Error::Connection`] if `open` failed
    /// - [`Error::Transport`] if identification failed on I/O
    pub async fn connect_with<F, Fut, E>(&self, open: F) -> Result<Model>
    where
        F: FnOnce(SerialSettings) -> Fut,
        Fut: Future<Output = std::result::Result<T, E>>,
        E: fmt::Display,
    {
        let inner = &self.inner;
        let _lifecycle = inner.lifecycle.lock().await;
        if inner.session.lock().is_some() {
            return Err(Error::AlreadyConnected);
        }

        inner.set_phase(ConnectionPhase::Connecting, None);
        let transport = match open(inner.config.serial).await {
            Ok(transport) => transport,
            Err(e) => {
                let message = e.to_string();
                tracing::warn!(error = %message, "Failed to open serial port");
                inner.status(&format!("Error: {message}"));
                inner.set_phase(ConnectionPhase::Disconnected, Some(message.clone()));
                return Err(Error::Connection(message));
            }
        };
        let link = Arc::new(SerialLink::new(transport, inner.config.serial.read_timeout));

        inner.set_phase(ConnectionPhase::Identifying, None);
        let model = match link
            .transact(&Command::Identify, inner.config.identify_delay)
            .await
        {
            Ok(line) => response::decode_model(&line),
            Err(TransportError::Timeout(_)) => {
                tracing::debug!("No identify response, model unknown");
                Model::Unknown
            }
            Err(e) => {
                tracing::warn!(error = %e, "Identify failed");
                inner.status(&format!("Model check error: {e}"));
                link.close().await;
                inner.set_phase(ConnectionPhase::Disconnected, Some(e.to_string()));
                return Err(e.into());
            }
        };

        inner.commit(Source::Poll, StateChange::Model(model));
        inner.set_phase(ConnectionPhase::Connected, None);
        inner.start_session(link);

        tracing::info!(model = %model.name(), "Connected");
        inner.status(&format!("Connected: {}", model.name()));
        Ok(model)
    }

    /// Stops polling and closes the link.
    ///
    /// A transaction already in flight is allowed to finish first. Returns
    /// `false` if no session was open.
    pub async fn disconnect(&self) -> bool {
        let inner = &self.inner;
        let _lifecycle = inner.lifecycle.lock().await;
        let Some(session) = inner.session.lock().take() else {
            return false;
        };

        session.shutdown().await;
        inner.set_phase(ConnectionPhase::Disconnected, None);
        tracing::info!("Disconnected");
        true
    }

    /// Returns `true` while a session is open.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.inner.session.lock().is_some()
    }

    // =========================================================================
    // User Commands
    // =========================================================================

    /// Sends a user directive and commits it once sent.
    ///
    /// Returns `true` if the state changed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotConnected`] without a session, or the transport
    /// error if the write failed. The state is untouched in both cases.
    pub async fn apply(&self, directive: Directive) -> Result<bool> {
        self.inner.dispatch(Event::User(directive)).await
    }

    /// Turns the output on.
    ///
    /// # Errors
    ///
    /// See [`apply`](Self::apply).
    pub async fn power_on(&self) -> Result<()> {
        self.set_power(PowerState::On).await
    }

    /// Turns the output off.
    ///
    /// # Errors
    ///
    /// See [`apply`](Self::apply).
    pub async fn power_off(&self) -> Result<()> {
        self.set_power(PowerState::Off).await
    }

    /// Sets the output power.
    ///
    /// # Errors
    ///
    /// See [`apply`](Self::apply).
    pub async fn set_power(&self, state: PowerState) -> Result<()> {
        self.apply(Directive::Power(state)).await.map(drop)
    }

    /// Sets the luminance level.
    ///
    /// # Errors
    ///
    /// See [`apply`](Self::apply).
    pub async fn set_ire(&self, level: IreLevel) -> Result<()> {
        self.apply(Directive::Ire(level)).await.map(drop)
    }

    /// Selects a test pattern.
    ///
    /// # Errors
    ///
    /// See [`apply`](Self::apply).
    pub async fn set_pattern(&self, pattern: Pattern) -> Result<()> {
        self.apply(Directive::Pattern(pattern)).await.map(drop)
    }

    /// Selects an output mode.
    ///
    /// # Errors
    ///
    /// See [`apply`](Self::apply).
    pub async fn set_resolution(&self, resolution: Resolution) -> Result<()> {
        self.apply(Directive::Resolution(resolution)).await.map(drop)
    }

    /// Selects a full-field color.
    ///
    /// # Errors
    ///
    /// See [`apply`](Self::apply).
    pub async fn set_color(&self, color: Color) -> Result<()> {
        self.apply(Directive::Color(color)).await.map(drop)
    }

    // =========================================================================
    // External Tracking
    // =========================================================================

    /// Starts sampling `observer` and steering the generator from its cues.
    ///
    /// Replaces any observer already running. Must be called inside a tokio
    /// runtime.
    pub fn enable_external_tracking<O: ExternalObserver>(&self, observer: O) {
        let (stop, stop_rx) = watch::channel(false);
        let weak = Arc::downgrade(&self.inner);
        let handle = tokio::spawn(scheduler::run_tracking(
            observer,
            self.inner.config.observer_period,
            stop_rx,
            move |text| {
                let weak = weak.clone();
                async move {
                    let Some(inner) = weak.upgrade() else {
                        return;
                    };
                    if let Err(e) = inner.apply_external_text(&text).await {
                        tracing::debug!(error = %e, "External cue not applied");
                    }
                }
            },
        ));

        let previous = self.inner.tracking.lock().replace(Tracking { stop, handle });
        if let Some(previous) = previous {
            previous.stop.send_replace(true);
        }
        tracing::info!("External tracking enabled");
    }

    /// Stops external tracking. Returns `false` if it was not running.
    pub fn disable_external_tracking(&self) -> bool {
        let Some(tracking) = self.inner.tracking.lock().take() else {
            return false;
        };
        tracking.stop.send_replace(true);
        tracing::info!("External tracking disabled");
        true
    }

    /// Returns `true` while external tracking is running.
    #[must_use]
    pub fn is_tracking(&self) -> bool {
        self.inner
            .tracking
            .lock()
            .as_ref()
            .is_some_and(|t| !t.handle.is_finished())
    }

    /// Interprets one observer snapshot and applies the cue it carries.
    ///
    /// Returns the cue, or `None` if the text carried none.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotConnected`] without a session, or the transport
    /// error if the write failed.
    pub async fn apply_external_text(&self, text: &str) -> Result<Option<Cue>> {
        self.inner.apply_external_text(text).await
    }
}

impl<T: Transport> Inner<T> {
    fn current_link(&self) -> Option<Arc<SerialLink<T>>> {
        self.session
            .lock()
            .as_ref()
            .map(|session| Arc::clone(&session.link))
    }

    fn notifiers(&self) -> Vec<Arc<dyn Notifier>> {
        self.notifiers.read().clone()
    }

    /// Sends the event's command, if any, then commits its change.
    async fn dispatch(&self, event: Event) -> Result<bool> {
        let verdict = Arbiter::resolve(&event);

        if let Some(command) = verdict.command {
            let Some(link) = self.current_link() else {
                // A tracking loop would repeat this every tick
                if verdict.source == Source::User {
                    self.status("Serial not open");
                }
                tracing::debug!(source = %verdict.source, command = %command, "Not connected, command dropped");
                return Err(Error::NotConnected);
            };

            if let Err(e) = link.send(&command).await {
                self.status(&format!("Send error: {e}"));
                if e.is_io_failure() {
                    self.link_lost(&link, &e);
                }
                return Err(e.into());
            }
        }

        Ok(self.commit(verdict.source, verdict.change))
    }

    async fn apply_external_text(&self, text: &str) -> Result<Option<Cue>> {
        let Some(cue) = self.interpreter.interpret(text) else {
            return Ok(None);
        };
        tracing::debug!(?cue, "External cue");
        self.dispatch(Event::External(cue)).await?;
        Ok(Some(cue))
    }

    pub(crate) fn apply_reading(&self, reading: Reading) {
        let verdict = Arbiter::resolve(&Event::Poll(reading));
        self.commit(verdict.source, verdict.change);
    }

    /// Tears down the session owning `link` after a write or read failure.
    ///
    /// A failure reported by a session that is no longer current is ignored.
    pub(crate) fn link_lost(&self, link: &Arc<SerialLink<T>>, error: &TransportError) {
        let session = {
            let mut slot = self.session.lock();
            if slot.as_ref().is_some_and(|s| Arc::ptr_eq(&s.link, link)) {
                slot.take()
            } else {
                None
            }
        };
        let Some(session) = session else {
            return;
        };

        session.signal_stop();
        tracing::warn!(error = %error, "Serial link lost");
        self.set_phase(ConnectionPhase::Disconnected, Some(error.to_string()));
    }

    fn start_session(self: &Arc<Self>, link: Arc<SerialLink<T>>) {
        // Held while spawning so an early failure finds the session in place
        let mut slot = self.session.lock();
        let session = Session::new(Arc::clone(&link));
        let sink = Arc::new(SessionSink::new(Arc::downgrade(self), Arc::clone(&link)));

        for task in PollTask::from_config(&self.config) {
            tracing::debug!(task = %task.name(), period = ?task.period(), "Starting poll task");
            session.track(tokio::spawn(scheduler::run_poll_task(
                task,
                self.config.first_poll_delay,
                Arc::clone(&link),
                session.stop_receiver(),
                Arc::clone(&sink),
            )));
        }
        *slot = Some(session);
    }

    /// Commits a change and notifies if it moved any field.
    fn commit(&self, source: Source, change: StateChange) -> bool {
        let _delivery = self.delivery.lock();
        let state = {
            let mut arbiter = self.arbiter.lock();
            if !arbiter.commit(&change) {
                return false;
            }
            let state = arbiter.snapshot();
            self.snapshot.send_replace(state.clone());
            state
        };

        tracing::debug!(%source, ?change, "State updated");
        for notifier in self.notifiers() {
            notifier.on_state_changed(&state);
        }
        self.events
            .publish(SyncEvent::state_changed(source, change, state));
        true
    }

    fn set_phase(&self, phase: ConnectionPhase, error: Option<String>) {
        let _delivery = self.delivery.lock();
        let state = {
            let mut arbiter = self.arbiter.lock();
            if !arbiter.set_phase(phase) {
                return;
            }
            let state = arbiter.snapshot();
            self.snapshot.send_replace(state.clone());
            state
        };

        tracing::debug!(%phase, "Connection phase changed");
        for notifier in self.notifiers() {
            notifier.on_state_changed(&state);
        }
        self.events
            .publish(SyncEvent::ConnectionChanged { phase, error });
    }

    fn status(&self, message: &str) {
        let _delivery = self.delivery.lock();
        tracing::debug!(status = %message, "Status");
        for notifier in self.notifiers() {
            notifier.on_status(message);
        }
        self.events.publish(SyncEvent::status(message));
    }
}

impl<T: Transport> Clone for SyncController<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Transport> Default for SyncController<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Transport> fmt::Debug for SyncController<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyncController")
            .field("state", &self.state())
            .field("connected", &self.is_connected())
            .field("tracking", &self.is_tracking())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::thread;
    use std::time::Duration;

    use tokio::io::DuplexStream;

    use super::*;
    use crate::error::ValueError;
    use crate::event::CallbackNotifier;
    use crate::protocol::StreamTransport;

    type Controller = SyncController<StreamTransport<DuplexStream>>;

    #[tokio::test]
    async fn user_command_without_session_is_rejected() {
        let controller = Controller::new();
        let notifier = Arc::new(CallbackNotifier::new());
        let statuses = Arc::new(Mutex::new(Vec::new()));
        let log = Arc::clone(&statuses);
        notifier.add_status_callback(move |message| log.lock().push(message.to_string()));
        controller.add_notifier(notifier);

        let err = controller.set_color(Color::Red).await.unwrap_err();

        assert!(matches!(err, Error::NotConnected));
        assert!(controller.state().color().is_none());
        assert_eq!(*statuses.lock(), vec!["Serial not open"]);
    }

    #[tokio::test]
    async fn external_text_without_session_is_quiet() {
        let controller = Controller::new();
        let mut events = controller.subscribe();

        let err = controller
            .apply_external_text("Blue primary")
            .await
            .unwrap_err();

        assert!(matches!(err, Error::NotConnected));
        assert!(events.try_recv().is_err());
        assert!(controller.state().color().is_none());
    }

    #[tokio::test]
    async fn text_without_cue_is_ok_none() {
        let controller = Controller::new();
        assert!(controller.apply_external_text("idle").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn open_failure_stays_disconnected() {
        let controller = Controller::new();
        let mut events = controller.subscribe();

        let err = controller
            .connect_with(|_| async { Err::<StreamTransport<DuplexStream>, _>(io::Error::other("no such port")) })
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Connection(ref message) if message == "no such port"));
        assert_eq!(controller.state().connection(), ConnectionPhase::Disconnected);
        assert!(!controller.is_connected());

        let mut seen = Vec::new();
        while let Ok(event) = events.try_recv() {
            seen.push(event);
        }
        assert!(matches!(
            seen.as_slice(),
            [
                SyncEvent::ConnectionChanged { phase: ConnectionPhase::Connecting, .. },
                SyncEvent::Status(status),
                SyncEvent::ConnectionChanged { phase: ConnectionPhase::Disconnected, error: Some(_) },
            ] if status == "Error: no such port"
        ));
    }

    #[tokio::test]
    async fn disconnect_without_session_is_false() {
        let controller = Controller::new();
        assert!(!controller.disconnect().await);
    }

    #[tokio::test]
    async fn tracking_toggle() {
        let controller = Controller::new();
        assert!(!controller.is_tracking());

        controller.enable_external_tracking(String::new);
        assert!(controller.is_tracking());

        assert!(controller.disable_external_tracking());
        assert!(!controller.is_tracking());
        assert!(!controller.disable_external_tracking());
    }

    #[test]
    fn zero_poll_period_is_refused() {
        let config = SyncConfig::default().with_ire_period(Duration::ZERO);

        let err = Controller::with_config(config).unwrap_err();

        assert!(matches!(err, Error::Value(ValueError::ZeroSetting("ire_period"))));
    }

    #[test]
    fn zero_event_capacity_is_refused() {
        let config = SyncConfig::default().with_event_capacity(0);
        assert!(Controller::with_config(config).is_err());
    }

    #[test]
    fn custom_config_is_kept() {
        let config = SyncConfig::default().with_observer_period(Duration::from_secs(1));
        let controller = Controller::with_config(config).unwrap();
        assert_eq!(controller.config().observer_period, Duration::from_secs(1));
    }

    #[test]
    fn notifiers_see_racing_commits_in_order() {
        let controller = Controller::new();
        let notifier = Arc::new(CallbackNotifier::new());
        let seen = Arc::new(Mutex::new(Vec::new()));
        let log = Arc::clone(&seen);
        notifier.add_state_callback(move |state| log.lock().push(state.ire()));
        controller.add_notifier(notifier);

        thread::scope(|scope| {
            for t in 0..4u32 {
                let inner = &controller.inner;
                scope.spawn(move || {
                    for i in 0..200u32 {
                        inner.apply_reading(Reading::Ire((t + i) % 11 * 10));
                    }
                });
            }
        });

        let seen = seen.lock();
        assert!(!seen.is_empty());
        // Each delivered snapshot differs from the one before it
        assert!(seen.windows(2).all(|pair| pair[0] != pair[1]));
        assert_eq!(seen.last().copied().flatten(), controller.state().ire());
    }

    #[test]
    fn clones_share_state() {
        let controller = Controller::new();
        let clone = controller.clone();
        controller.inner.apply_reading(Reading::Ire(100));
        assert_eq!(clone.state().ire(), Some(IreLevel::MAX));
    }
}
