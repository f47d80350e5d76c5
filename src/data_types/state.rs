/// Hover state machine of the tooltip controller.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HoverState {
    #[default]
    Idle,
    Hovering(usize),
    /// Pointer outside the interactive region, no marker in range, or no data.
    Suppressed,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TooltipState {
    pub hover: HoverState,
    pub visible: bool,
}

impl TooltipState {
    pub fn hovered_index(&self) -> Option<usize> {
        match self.hover {
            HoverState::Hovering(index) => Some(index),
            _ => None,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
