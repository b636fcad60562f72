use serde_derive::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PowerPreference {
    Default,
    HighPerformance,
    LowPower,
}

impl Default for PowerPreference {
    fn default() -> Self {
        PowerPreference::Default
    }
}

/// Context creation attributes passed to the canvas when the rendering context is requested.
///
/// The defaults match the browser's defaults for `getContext`:
///
/// ```
/// use webgl_handles::runtime::{ContextOptions, PowerPreference};
///
/// let options = ContextOptions::begin()
///     .disable_antialias()
///     .enable_stencil()
///     .power_preference(PowerPreference::HighPerformance)
///     .finish();
///
/// assert!(!options.antialias());
/// assert!(options.stencil());
/// assert!(options.depth());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextOptions {
    alpha: bool,
    antialias: bool,
    depth: bool,
    stencil: bool,
    fail_if_major_performance_caveat: bool,
    power_preference: PowerPreference,
    premultiplied_alpha: bool,
    preserve_drawing_buffer: bool,
}

impl ContextOptions {
    pub fn begin() -> ContextOptionsBuilder {
        ContextOptionsBuilder {
            options: ContextOptions::default(),
        }
    }

    pub fn alpha(&self) -> bool {
        self.alpha
    }

    pub fn antialias(&self) -> bool {
        self.antialias
    }

    pub fn depth(&self) -> bool {
        self.depth
    }

    pub fn stencil(&self) -> bool {
        self.stencil
    }

    pub fn fail_if_major_performance_caveat(&self) -> bool {
        self.fail_if_major_performance_caveat
    }

    pub fn power_preference(&self) -> PowerPreference {
        self.power_preference
    }

    pub fn premultiplied_alpha(&self) -> bool {
        self.premultiplied_alpha
    }

    pub fn preserve_drawing_buffer(&self) -> bool {
        self.preserve_drawing_buffer
    }
}

impl Default for ContextOptions {
    fn default() -> Self {
        ContextOptions {
            alpha: true,
            antialias: true,
            depth: true,
            stencil: false,
            fail_if_major_performance_caveat: false,
            power_preference: PowerPreference::default(),
            premultiplied_alpha: true,
            preserve_drawing_buffer: false,
        }
    }
}

pub struct ContextOptionsBuilder {
    options: ContextOptions,
}

impl ContextOptionsBuilder {
    pub fn disable_alpha(mut self) -> Self {
        self.options.alpha = false;

        self
    }

    pub fn disable_antialias(mut self) -> Self {
        self.options.antialias = false;

        self
    }

    pub fn disable_depth(mut self) -> Self {
        self.options.depth = false;

        self
    }

    pub fn enable_stencil(mut self) -> Self {
        self.options.stencil = true;

        self
    }

    pub fn fail_if_major_performance_caveat(
        mut self,
        fail_if_major_performance_caveat: bool,
    ) -> Self {
        self.options.fail_if_major_performance_caveat = fail_if_major_performance_caveat;

        self
    }

    pub fn power_preference(mut self, power_preference: PowerPreference) -> Self {
        self.options.power_preference = power_preference;

        self
    }

    pub fn premultiplied_alpha(mut self, premultiplied_alpha: bool) -> Self {
        self.options.premultiplied_alpha = premultiplied_alpha;

        self
    }

    pub fn preserve_drawing_buffer(mut self, preserve_drawing_buffer: bool) -> Self {
        self.options.preserve_drawing_buffer = preserve_drawing_buffer;

        self
    }

    pub fn finish(self) -> ContextOptions {
        self.options
    }
}
