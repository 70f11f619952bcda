use log::{debug, info, trace};

use super::collaborators::{FrameSource, MonitorInstance, RigidBody};
use super::frame::FrameSize;
use super::transform::{place, screen_scale, Placement};
use crate::config::ArrayConfig;
use crate::control::{MonitorController, PidGains};
use crate::error::{check_timestep, ConfigError, ControlError};
use crate::layout::{partition, Cell, UnitRandom};

// ---------------------------------------------------------------------------
// One monitor: its cell, placement, stabilizer and engine instance
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct Monitor<M> {
    pub cell: Cell,
    pub placement: Placement,
    pub controller: MonitorController,
    pub instance: M,
}

// ---------------------------------------------------------------------------
// Monitor array orchestrator
// ---------------------------------------------------------------------------

/// Lays out a video wall once and keeps its monitors in place.
///
/// All derived state (cells, placements, screen scales) is recomputed from
/// the config and frame size, so calls may arrive in any order.
#[derive(Debug)]
pub struct MonitorArray<M> {
    config: ArrayConfig,
    frame: FrameSize,
    monitors: Vec<Monitor<M>>,
}

impl<M: MonitorInstance> MonitorArray<M> {
    /// Validate, partition and place. `factory` creates the engine object for each cell.
    pub fn build<F>(
        config: ArrayConfig,
        frame: FrameSize,
        rng: &mut dyn UnitRandom,
        factory: F,
    ) -> Result<Self, ConfigError>
    where
        F: FnMut(&Cell) -> M,
    {
        let mut array = Self { config, frame, monitors: Vec::new() };
        array.rebuild(rng, factory)?;
        Ok(array)
    }

    /// Throw away every monitor and lay the array out again.
    pub fn rebuild<F>(&mut self, rng: &mut dyn UnitRandom, mut factory: F) -> Result<(), ConfigError>
    where
        F: FnMut(&Cell) -> M,
    {
        self.frame.validate()?;
        let cells = partition(&self.config, rng)?;
        let mut monitors = Vec::with_capacity(cells.len());

        for cell in cells {
            let placement = place(&cell, &self.config, self.frame);
            let controller = MonitorController::new(
                placement.position,
                self.config.positional_gains,
                self.config.rotational_gains,
            );
            let mut instance = factory(&cell);
            instance.apply_placement(&placement);
            instance.set_border_size(self.config.border_size, placement.screen_scale);
            monitors.push(Monitor { cell, placement, controller, instance });
        }

        info!(
            "built {} monitors, array {:.2}x{:.2} units",
            monitors.len(),
            self.config.world_extent(self.frame).x,
            self.config.world_extent(self.frame).y
        );
        self.monitors = monitors;
        Ok(())
    }

    /// Change the bezel width. Only screen scales are recomputed.
    pub fn set_border_size(&mut self, border: f64) -> Result<(), ConfigError> {
        if !border.is_finite() || border < 0.0 {
            return Err(ConfigError::InvalidBorderSize(border));
        }
        self.config.border_size = border;
        for m in &mut self.monitors {
            m.placement.screen_scale = screen_scale(m.placement.monitor_extent(), border);
            m.instance.set_border_size(border, m.placement.screen_scale);
        }
        debug!("border size now {}", border);
        Ok(())
    }

    /// Change the monitor size factor and re-place every monitor.
    ///
    /// Footprints are kept, so a clumped layout is not re-rolled. Root
    /// positions do not move; only extents, mapping and mass change.
    pub fn set_monitor_size_factor(&mut self, factor: f64) -> Result<(), ConfigError> {
        if !(factor > 0.0 && factor <= 1.0) {
            return Err(ConfigError::InvalidSizeFactor(factor));
        }
        self.config.monitor_size_factor = factor;
        let (w, h) = (self.config.array_width, self.config.array_height);
        for m in &mut self.monitors {
            m.cell = Cell::from_footprint(m.cell.footprint, w, h, factor);
            m.placement = place(&m.cell, &self.config, self.frame);
            m.instance.apply_placement(&m.placement);
            m.instance.set_border_size(self.config.border_size, m.placement.screen_scale);
        }
        debug!("monitor size factor now {}", factor);
        Ok(())
    }

    /// Replace the gains of every monitor's controllers.
    pub fn set_gains(&mut self, positional: PidGains, rotational: PidGains) {
        self.config.positional_gains = positional;
        self.config.rotational_gains = rotational;
        for m in &mut self.monitors {
            m.controller.set_gains(positional, rotational);
        }
    }

    /// Forward the current frame to every monitor. No frame yet: nothing happens.
    ///
    /// Returns whether a frame was shown.
    pub fn display<S>(&mut self, source: &S) -> bool
    where
        S: FrameSource<Frame = M::Frame>,
    {
        let Some(frame) = source.current_frame() else {
            trace!("no frame available, skipping display");
            return false;
        };
        for m in &mut self.monitors {
            m.instance.display(frame, &m.placement.uv, &m.placement.crop);
        }
        true
    }

    pub fn config(&self) -> &ArrayConfig {
        &self.config
    }

    pub fn frame_size(&self) -> FrameSize {
        self.frame
    }

    pub fn monitors(&self) -> &[Monitor<M>] {
        &self.monitors
    }

    pub fn monitors_mut(&mut self) -> &mut [Monitor<M>] {
        &mut self.monitors
    }

    pub fn len(&self) -> usize {
        self.monitors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.monitors.is_empty()
    }
}

impl<M: MonitorInstance + RigidBody> MonitorArray<M> {
    /// One fixed physics tick: correct every monitor toward its root pose.
    pub fn fixed_update(&mut self, dt: f64) -> Result<(), ControlError> {
        check_timestep(dt)?;
        for m in &mut self.monitors {
            let state = m.instance.body_state();
            let correction = m.controller.update(&state, dt)?;
            m.instance.add_force(correction.force);
            m.instance.add_torque(correction.torque);
        }
        Ok(())
    }
}
