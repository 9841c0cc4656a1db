//! A push button that shows a spinner while work is in progress.
//!
//! Clicking a [`SpinningButton`] starts the spinner: the icon is replaced by
//! a rotating graphic and, by default, the button disables itself. The
//! spinner stops when any of these happens first:
//!
//! - the bound stop signal fires (see [`SpinningButton::set_enable_signal`])
//! - the timeout elapses (60 seconds by default, zero disables it)
//! - [`SpinningButton::enable_button`] is called directly
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use std::time::Duration;
//! use tether::widget::widgets::SpinningButton;
//! use tether_core::{EventLoop, Signal};
//!
//! let event_loop = EventLoop::new();
//! let sync_finished = Arc::new(Signal::<()>::new());
//!
//! let button = SpinningButton::builder("Sync")
//!     .timeout_secs(30)
//!     .stop_signal(&sync_finished)
//!     .build(&event_loop)
//!     .unwrap();
//!
//! button.click();
//! assert!(button.is_spinning());
//! assert!(!button.is_enabled());
//!
//! event_loop.advance(Duration::from_secs(2));
//! sync_finished.emit(());
//! assert!(!button.is_spinning());
//! assert!(button.is_enabled());
//! ```
//!
//! # Signals
//!
//! - `clicked()`: the button was activated while enabled
//! - `started_spinning()`: Idle to Spinning, once per transition
//! - `stopped_spinning()`: Spinning to Idle, once per transition
//! - `destroyed(ObjectId)`: the button is being torn down

use std::sync::{Arc, Weak};
use std::time::Duration;

use parking_lot::Mutex;

use tether_core::{
    EventLoop, Object, ObjectId, ObjectResult, Signal, SignalOwner, SignalRegistry,
    SignalSource, SubscriptionTracker, Timer, DESTROYED_SIGNAL,
};
use tether_render::{
    Color, FrameRenderer, Icon, IconSize, Size, SpinnerGraphic, SvgSpinnerRenderer,
};

use super::button_base::ButtonBase;
use super::spinning_button_config::SpinningButtonConfig;
use crate::error::{Error, Result};
use crate::widget::SizeHint;

const LOG_TARGET: &str = "tether::spinning_button";

/// Time between spinner frames.
pub const TICK_INTERVAL: Duration = Duration::from_millis(100);

/// Degrees the spinner advances per frame.
pub const ROTATION_STEP: u16 = 10;

struct SpinState {
    button: ButtonBase,
    spinning: bool,
    /// Current frame angle in degrees, always a multiple of [`ROTATION_STEP`] below 360.
    rotation_angle: u16,
    disable_while_spinning: bool,
    timeout_secs: u64,
    /// Icon shown while idle.
    enabled_icon: Icon,
    /// Set when starting the spinner disabled the button, so that stopping
    /// re-enables only what it disabled.
    auto_disabled: bool,
    padding: f32,
}

struct Inner {
    state: Mutex<SpinState>,
    tick_timer: Timer,
    timeout_timer: Timer,
    renderer: Arc<dyn FrameRenderer>,

    clicked: Arc<Signal<()>>,
    started_spinning: Arc<Signal<()>>,
    stopped_spinning: Arc<Signal<()>>,
    destroyed: Arc<Signal<ObjectId>>,
    signals: SignalRegistry,

    /// The button's own timer and click wiring.
    internal: Mutex<SubscriptionTracker>,
    /// At most one record: the current stop-signal subscription.
    stop_binding: Mutex<SubscriptionTracker>,
}

/// A button that spins until told to stop.
///
/// The button owns its timers and subscriptions. Dropping it stops both
/// timers, disconnects every subscription it made, emits `destroyed`, and
/// unregisters it from the object registry.
pub struct SpinningButton {
    inner: Arc<Inner>,
}

impl SpinningButton {
    /// Create a button with the built-in spinner and default settings.
    pub fn new(text: impl Into<String>, event_loop: &EventLoop) -> Self {
        let config = SpinningButtonConfig {
            text: text.into(),
            ..Default::default()
        };
        Self::from_parts(
            event_loop,
            config,
            IconSize::default(),
            Icon::empty(),
            Arc::new(SvgSpinnerRenderer::default()),
        )
    }

    /// Start building a button.
    pub fn builder(text: impl Into<String>) -> SpinningButtonBuilder {
        SpinningButtonBuilder::new(text)
    }

    fn from_parts(
        event_loop: &EventLoop,
        config: SpinningButtonConfig,
        icon_size: IconSize,
        enabled_icon: Icon,
        renderer: Arc<dyn FrameRenderer>,
    ) -> Self {
        let mut button = ButtonBase::new::<Self>(config.text);
        button.set_icon_size(icon_size);
        button.set_icon(enabled_icon.clone());

        let tick_timer = Timer::new(event_loop);
        tick_timer.set_interval(TICK_INTERVAL);
        let timeout_timer = Timer::new(event_loop);
        timeout_timer.set_single_shot(true);

        let clicked = Arc::new(Signal::<()>::new());
        let started_spinning = Arc::new(Signal::<()>::new());
        let stopped_spinning = Arc::new(Signal::<()>::new());
        let destroyed = Arc::new(Signal::<ObjectId>::new());

        let mut signals = SignalRegistry::new();
        signals.register("clicked", &clicked);
        signals.register("started_spinning", &started_spinning);
        signals.register("stopped_spinning", &stopped_spinning);
        signals.register(DESTROYED_SIGNAL, &destroyed);

        let inner = Arc::new(Inner {
            state: Mutex::new(SpinState {
                button,
                spinning: false,
                rotation_angle: 0,
                disable_while_spinning: config.disable_while_spinning,
                timeout_secs: config.timeout_secs,
                enabled_icon,
                auto_disabled: false,
                padding: config.padding,
            }),
            tick_timer,
            timeout_timer,
            renderer,
            clicked,
            started_spinning,
            stopped_spinning,
            destroyed,
            signals,
            internal: Mutex::new(SubscriptionTracker::new()),
            stop_binding: Mutex::new(SubscriptionTracker::new()),
        });
        Inner::wire(&inner);

        tracing::debug!(target: LOG_TARGET, id = ?inner.object_id(), "spinning button created");
        Self { inner }
    }

    // =========================================================================
    // Spinning
    // =========================================================================

    /// Start spinning. Safe to call repeatedly.
    ///
    /// When already spinning, only timers that have stopped are restarted;
    /// the angle is kept and `started_spinning` is not emitted again.
    pub fn start_spin(&self) {
        self.inner.start_spin();
    }

    /// Stop spinning and restore the idle icon. Safe to call repeatedly.
    ///
    /// This is the only way back to idle: the timeout timer and the stop
    /// signal both end up here.
    pub fn enable_button(&self) {
        self.inner.enable_button();
    }

    /// Whether the spinner is running.
    pub fn is_spinning(&self) -> bool {
        self.inner.state.lock().spinning
    }

    /// Current spinner angle in degrees.
    pub fn rotation_angle(&self) -> u16 {
        self.inner.state.lock().rotation_angle
    }

    /// Activate the button as if the user clicked it.
    ///
    /// Ignored while the button is disabled.
    pub fn click(&self) {
        if !self.is_enabled() {
            tracing::trace!(target: LOG_TARGET, "click ignored while disabled");
            return;
        }
        self.inner.clicked.emit(());
    }

    // =========================================================================
    // Stop Signal
    // =========================================================================

    /// Bind the signal that stops the spinner, replacing any previous binding.
    ///
    /// The previous subscription is removed first, best effort. If the new
    /// signal refuses the subscription, the failure is logged and the button
    /// is left with no stop signal; the timeout and [`enable_button`] still
    /// work. Safe to call while spinning and from a slot of the stop signal
    /// itself.
    ///
    /// [`enable_button`]: Self::enable_button
    pub fn set_enable_signal<Args, S>(&self, signal: &Arc<S>)
    where
        Args: 'static,
        S: SignalSource<Args> + 'static,
    {
        self.inner.set_enable_signal::<Args, S>(signal);
    }

    /// Remove the stop-signal binding, if any.
    pub fn clear_enable_signal(&self) {
        self.inner.clear_enable_signal();
    }

    /// Whether a stop signal is currently bound and still alive.
    pub fn has_enable_signal(&self) -> bool {
        self.inner
            .stop_binding
            .lock()
            .records()
            .iter()
            .any(|record| record.is_signal_alive())
    }

    // =========================================================================
    // Icon and Geometry
    // =========================================================================

    /// The icon currently shown: a spinner frame while spinning, otherwise
    /// the enabled icon.
    pub fn icon(&self) -> Icon {
        self.inner.state.lock().button.icon().clone()
    }

    /// Icon shown while idle.
    pub fn enabled_icon(&self) -> Icon {
        self.inner.state.lock().enabled_icon.clone()
    }

    /// Replace the idle icon. Shown immediately unless spinning.
    pub fn set_enabled_icon(&self, icon: Icon) {
        let mut state = self.inner.state.lock();
        if !state.spinning {
            state.button.set_icon(icon.clone());
        }
        state.enabled_icon = icon;
    }

    /// Size the icon and spinner are drawn at.
    pub fn icon_size(&self) -> IconSize {
        self.inner.state.lock().button.icon_size()
    }

    /// Change the icon size.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSizeArgument`] for sizes that are not finite,
    /// not positive, or too large. The current size is kept.
    pub fn set_icon_size(&self, size: Size) -> Result<()> {
        let size = IconSize::try_from(size)?;
        let spinning = {
            let mut state = self.inner.state.lock();
            state.button.set_icon_size(size);
            state.spinning
        };
        if spinning {
            self.inner.render_current_frame();
        }
        Ok(())
    }

    /// Device pixel ratio frames are rendered at.
    pub fn scale_factor(&self) -> f32 {
        self.inner.state.lock().button.scale_factor()
    }

    pub fn set_scale_factor(&self, scale_factor: f32) {
        let spinning = {
            let mut state = self.inner.state.lock();
            state.button.set_scale_factor(scale_factor);
            state.spinning
        };
        if spinning {
            self.inner.render_current_frame();
        }
    }

    /// Space reserved on each side of the icon.
    pub fn padding(&self) -> f32 {
        self.inner.state.lock().padding
    }

    /// Preferred size: the label's hint widened by the icon and its padding,
    /// and at least as tall as the icon.
    pub fn size_hint(&self) -> SizeHint {
        let state = self.inner.state.lock();
        let icon = state.button.icon_size().to_size();
        state
            .button
            .default_size_hint()
            .widened(icon.width + 2.0 * state.padding, icon.height)
    }

    // =========================================================================
    // Widget State
    // =========================================================================

    pub fn text(&self) -> String {
        self.inner.state.lock().button.text().to_owned()
    }

    pub fn set_text(&self, text: impl Into<String>) {
        self.inner.state.lock().button.set_text(text);
    }

    pub fn is_enabled(&self) -> bool {
        self.inner.state.lock().button.widget_base().is_enabled()
    }

    /// Enable or disable the button.
    ///
    /// An explicit call overrides any automatic disabling: stopping the
    /// spinner will not re-enable a button disabled here.
    pub fn set_enabled(&self, enabled: bool) {
        let mut state = self.inner.state.lock();
        state.auto_disabled = false;
        state.button.widget_base_mut().set_enabled(enabled);
    }

    /// Seconds before the spinner stops by itself. Zero means never.
    pub fn timeout_secs(&self) -> u64 {
        self.inner.state.lock().timeout_secs
    }

    /// Change the timeout. Takes effect the next time a timeout is started.
    pub fn set_timeout_secs(&self, timeout_secs: u64) {
        self.inner.state.lock().timeout_secs = timeout_secs;
    }

    pub fn disable_while_spinning(&self) -> bool {
        self.inner.state.lock().disable_while_spinning
    }

    pub fn set_disable_while_spinning(&self, disable: bool) {
        self.inner.state.lock().disable_while_spinning = disable;
    }

    /// Whether a repaint has been requested since the last [`take_repaint`](Self::take_repaint).
    pub fn needs_repaint(&self) -> bool {
        self.inner.state.lock().button.widget_base().needs_repaint()
    }

    /// Clear and return the pending repaint request.
    pub fn take_repaint(&self) -> bool {
        self.inner.state.lock().button.widget_base_mut().take_repaint()
    }

    pub fn parent(&self) -> Option<ObjectId> {
        self.inner.state.lock().button.widget_base().parent()
    }

    pub fn set_parent(&self, parent: Option<ObjectId>) -> ObjectResult<()> {
        self.inner.state.lock().button.widget_base().set_parent(parent)
    }

    // =========================================================================
    // Signals
    // =========================================================================

    /// Emitted when the button is activated while enabled.
    pub fn clicked(&self) -> &Arc<Signal<()>> {
        &self.inner.clicked
    }

    /// Emitted once per transition from idle to spinning.
    pub fn started_spinning(&self) -> &Arc<Signal<()>> {
        &self.inner.started_spinning
    }

    /// Emitted once per transition from spinning to idle.
    pub fn stopped_spinning(&self) -> &Arc<Signal<()>> {
        &self.inner.stopped_spinning
    }

    /// Emitted with the button's id while it is being dropped.
    pub fn destroyed(&self) -> &Arc<Signal<ObjectId>> {
        &self.inner.destroyed
    }
}

impl Object for SpinningButton {
    fn object_id(&self) -> ObjectId {
        self.inner.object_id()
    }
}

impl SignalOwner for SpinningButton {
    fn signal_registry(&self) -> &SignalRegistry {
        &self.inner.signals
    }
}

impl std::fmt::Debug for SpinningButton {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.inner.state.lock();
        f.debug_struct("SpinningButton")
            .field("text", &state.button.text())
            .field("spinning", &state.spinning)
            .field("rotation_angle", &state.rotation_angle)
            .field("enabled", &state.button.widget_base().is_enabled())
            .finish_non_exhaustive()
    }
}

impl Drop for SpinningButton {
    fn drop(&mut self) {
        let inner = &self.inner;
        inner.tick_timer.stop();
        inner.timeout_timer.stop();

        let mut binding = std::mem::take(&mut *inner.stop_binding.lock());
        binding.disconnect_all();
        let mut internal = std::mem::take(&mut *inner.internal.lock());
        internal.disconnect_all();

        let id = inner.object_id();
        tracing::debug!(target: LOG_TARGET, ?id, "spinning button destroyed");
        inner.destroyed.emit(id);
    }
}

impl Inner {
    /// Connect the timers and the click signal back to this button.
    fn wire(this: &Arc<Self>) {
        let mut internal = this.internal.lock();

        let weak = Arc::downgrade(this);
        let ticks = internal.connect(this.tick_timer.timeout(), move |_| {
            with_inner(&weak, Inner::tick);
        });

        let weak = Arc::downgrade(this);
        let timeouts = internal.connect(this.timeout_timer.timeout(), move |_| {
            tracing::debug!(target: LOG_TARGET, "spinner timed out");
            with_inner(&weak, Inner::enable_button);
        });

        let weak = Arc::downgrade(this);
        let clicks = internal.connect(&this.clicked, move |_| {
            with_inner(&weak, Inner::on_clicked);
        });

        // Our own signals are never closed.
        for result in [ticks, timeouts, clicks] {
            if let Err(err) = result {
                tracing::warn!(target: LOG_TARGET, %err, "internal wiring failed");
            }
        }
    }

    fn object_id(&self) -> ObjectId {
        self.state.lock().button.widget_base().object_id()
    }

    fn start_spin(&self) {
        let (icon_size, scale_factor, timeout_secs) = {
            let mut state = self.state.lock();
            if state.spinning {
                let timeout_secs = state.timeout_secs;
                drop(state);
                if !self.tick_timer.is_active() {
                    self.tick_timer.start();
                }
                if timeout_secs > 0 && !self.timeout_timer.is_active() {
                    self.timeout_timer.start_with(Duration::from_secs(timeout_secs));
                }
                return;
            }

            state.spinning = true;
            state.rotation_angle = 0;
            if state.disable_while_spinning && state.button.widget_base().is_enabled() {
                state.button.widget_base_mut().set_enabled(false);
                state.auto_disabled = true;
            }
            (
                state.button.icon_size(),
                state.button.scale_factor(),
                state.timeout_secs,
            )
        };

        let frame = self.renderer.render_frame(0.0, icon_size, scale_factor);
        self.show_frame(0, frame);

        if !self.tick_timer.is_active() {
            self.tick_timer.start();
        }
        if timeout_secs > 0 {
            self.timeout_timer.start_with(Duration::from_secs(timeout_secs));
        }

        tracing::debug!(target: LOG_TARGET, timeout_secs, "started spinning");
        self.started_spinning.emit(());
        self.state.lock().button.widget_base_mut().update();
    }

    fn enable_button(&self) {
        self.tick_timer.stop();
        self.timeout_timer.stop();

        let was_spinning = {
            let mut state = self.state.lock();
            let was_spinning = std::mem::replace(&mut state.spinning, false);
            if was_spinning {
                let icon = state.enabled_icon.clone();
                state.button.set_icon(icon);
                if std::mem::take(&mut state.auto_disabled) {
                    state.button.widget_base_mut().set_enabled(true);
                }
                state.button.widget_base_mut().update();
            }
            was_spinning
        };

        if was_spinning {
            tracing::debug!(target: LOG_TARGET, "stopped spinning");
            self.stopped_spinning.emit(());
        }
    }

    fn on_clicked(&self) {
        if !self.state.lock().button.widget_base().is_enabled() {
            return;
        }
        self.start_spin();
    }

    fn tick(&self) {
        let next = {
            let mut state = self.state.lock();
            if state.spinning {
                state.rotation_angle = (state.rotation_angle + ROTATION_STEP) % 360;
                Some((
                    state.rotation_angle,
                    state.button.icon_size(),
                    state.button.scale_factor(),
                ))
            } else {
                None
            }
        };

        match next {
            Some((angle, icon_size, scale_factor)) => {
                let frame = self.renderer.render_frame(angle as f32, icon_size, scale_factor);
                self.show_frame(angle, frame);
            }
            None => self.tick_timer.stop(),
        }
    }

    fn render_current_frame(&self) {
        let (angle, icon_size, scale_factor) = {
            let state = self.state.lock();
            (
                state.rotation_angle,
                state.button.icon_size(),
                state.button.scale_factor(),
            )
        };
        let frame = self.renderer.render_frame(angle as f32, icon_size, scale_factor);
        self.show_frame(angle, frame);
    }

    /// Show a rendered frame unless the spinner moved on while it rendered.
    fn show_frame(&self, angle: u16, frame: Icon) {
        let mut state = self.state.lock();
        if state.spinning && state.rotation_angle == angle {
            state.button.set_icon(frame);
        }
    }

    fn set_enable_signal<Args, S>(self: &Arc<Self>, signal: &Arc<S>)
    where
        Args: 'static,
        S: SignalSource<Args> + 'static,
    {
        self.clear_enable_signal();

        let weak = Arc::downgrade(self);
        let mut binding = SubscriptionTracker::new();
        match binding.connect(signal, move |_: &Args| {
            with_inner(&weak, Inner::enable_button);
        }) {
            Ok(connection) => {
                tracing::debug!(target: LOG_TARGET, ?connection, "stop signal bound");
            }
            Err(err) => {
                tracing::warn!(target: LOG_TARGET, %err, "could not bind stop signal, continuing without one");
            }
        }

        let replaced = std::mem::replace(&mut *self.stop_binding.lock(), binding);
        drop(replaced);
    }

    fn clear_enable_signal(&self) {
        let mut previous = std::mem::take(&mut *self.stop_binding.lock());
        if previous.disconnect_all() > 0 {
            tracing::debug!(target: LOG_TARGET, "stop signal unbound");
        }
    }
}

fn with_inner(weak: &Weak<Inner>, f: impl FnOnce(&Inner)) {
    if let Some(inner) = weak.upgrade() {
        f(&inner);
    }
}

// =============================================================================
// Builder
// =============================================================================

type Binder = Box<dyn FnOnce(&SpinningButton)>;

/// Builder for [`SpinningButton`].
///
/// ```
/// use tether::widget::widgets::SpinningButton;
/// use tether_core::EventLoop;
/// use tether_render::Icon;
///
/// let event_loop = EventLoop::new();
/// let button = SpinningButton::builder("Broadcast")
///     .timeout_secs(0)
///     .disable_while_spinning(false)
///     .enabled_icon(Icon::named("mail-send"))
///     .spinner_color("#e53935")
///     .build(&event_loop)
///     .unwrap();
///
/// assert_eq!(button.timeout_secs(), 0);
/// assert_eq!(button.icon().name(), Some("mail-send"));
/// ```
pub struct SpinningButtonBuilder {
    config: SpinningButtonConfig,
    enabled_icon: Option<Icon>,
    renderer: Option<Arc<dyn FrameRenderer>>,
    parent: Option<ObjectId>,
    stop_signal: Option<Binder>,
}

impl SpinningButtonBuilder {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            config: SpinningButtonConfig {
                text: text.into(),
                ..Default::default()
            },
            enabled_icon: None,
            renderer: None,
            parent: None,
            stop_signal: None,
        }
    }

    /// Start from a loaded configuration. Replaces everything set so far
    /// except the renderer, parent, enabled icon handle, and stop signal.
    pub fn config(mut self, config: SpinningButtonConfig) -> Self {
        self.config = config;
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.config.text = text.into();
        self
    }

    /// Seconds before the spinner stops by itself. Zero means never.
    pub fn timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.config.timeout_secs = timeout_secs;
        self
    }

    pub fn disable_while_spinning(mut self, disable: bool) -> Self {
        self.config.disable_while_spinning = disable;
        self
    }

    pub fn icon_size(mut self, width: f32, height: f32) -> Self {
        self.config.icon_size.width = width;
        self.config.icon_size.height = height;
        self
    }

    pub fn padding(mut self, padding: f32) -> Self {
        self.config.padding = padding;
        self
    }

    /// Icon shown while idle. Takes precedence over a configured theme name.
    pub fn enabled_icon(mut self, icon: Icon) -> Self {
        self.enabled_icon = Some(icon);
        self
    }

    /// SVG drawn as the spinner.
    pub fn spinner_svg(mut self, svg: impl Into<String>) -> Self {
        self.config.spinner_svg = Some(svg.into());
        self
    }

    /// `#rrggbb` color substituted for `currentColor` in the spinner.
    pub fn spinner_color(mut self, color: impl Into<String>) -> Self {
        self.config.spinner_color = Some(color.into());
        self
    }

    /// Render frames with `renderer` instead of rasterising the spinner SVG.
    pub fn renderer(mut self, renderer: Arc<dyn FrameRenderer>) -> Self {
        self.renderer = Some(renderer);
        self
    }

    pub fn parent(mut self, parent: ObjectId) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Signal that stops the spinner.
    pub fn stop_signal<Args, S>(mut self, signal: &Arc<S>) -> Self
    where
        Args: 'static,
        S: SignalSource<Args> + 'static,
    {
        let signal = signal.clone();
        self.stop_signal = Some(Box::new(move |button: &SpinningButton| {
            button.set_enable_signal::<Args, S>(&signal);
        }));
        self
    }

    /// Build the button on `event_loop`.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidGraphicDefinition`] if the spinner SVG does not parse
    /// - [`Error::InvalidColor`] if the spinner color is not `#rrggbb`
    /// - [`Error::InvalidSizeArgument`] for a bad icon size or padding
    pub fn build(self, event_loop: &EventLoop) -> Result<SpinningButton> {
        let config = self.config;

        let icon_size = IconSize::try_from(Size::from(config.icon_size))?;
        if !config.padding.is_finite() || config.padding < 0.0 {
            return Err(Error::InvalidSizeArgument(Size::new(config.padding, config.padding)));
        }

        let graphic = match &config.spinner_svg {
            Some(svg) => Some(SpinnerGraphic::from_svg(svg)?),
            None => None,
        };
        let renderer = match self.renderer {
            Some(renderer) => renderer,
            None => {
                let mut graphic = graphic.unwrap_or_default();
                if let Some(hex) = &config.spinner_color {
                    let color =
                        Color::from_hex(hex).ok_or_else(|| Error::InvalidColor(hex.clone()))?;
                    graphic = graphic.with_color(color)?;
                }
                Arc::new(SvgSpinnerRenderer::new(graphic)) as Arc<dyn FrameRenderer>
            }
        };

        let enabled_icon = match (self.enabled_icon, &config.enabled_icon) {
            (Some(icon), _) => icon,
            (None, Some(name)) => Icon::named(name),
            (None, None) => Icon::empty(),
        };

        let button = SpinningButton::from_parts(event_loop, config, icon_size, enabled_icon, renderer);
        if let Some(parent) = self.parent {
            if let Err(err) = button.set_parent(Some(parent)) {
                tracing::warn!(target: LOG_TARGET, ?parent, %err, "could not attach to parent");
            }
        }
        if let Some(bind) = self.stop_signal {
            bind(&button);
        }
        Ok(button)
    }
}
