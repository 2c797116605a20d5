use super::actions::IrAction;
use super::connections::{IrConnection, IrConnectionInput};
use super::inputs::IrInput;

/// Normalization every IR node goes through before it is stored: optional
/// text that carries nothing and empty choice lists become `None`, so an
/// absent field is always represented as absent.
pub trait Finalize: Sized {
    fn finalize(self) -> Self;
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

impl Finalize for IrInput {
    fn finalize(self) -> Self {
        Self {
            comments: non_blank(self.comments),
            example: non_blank(self.example),
            model: self.model.filter(|choices| !choices.is_empty()),
            ..self
        }
    }
}

impl Finalize for IrConnectionInput {
    fn finalize(self) -> Self {
        Self {
            comments: non_blank(self.comments),
            example: non_blank(self.example),
            ..self
        }
    }
}

impl Finalize for IrAction {
    fn finalize(self) -> Self {
        Self {
            inputs: self
                .inputs
                .into_iter()
                .map(|(key, input)| (key, input.finalize()))
                .collect(),
            ..self
        }
    }
}

impl Finalize for IrConnection {
    fn finalize(self) -> Self {
        Self {
            comments: non_blank(self.comments),
            inputs: self
                .inputs
                .into_iter()
                .map(|(key, input)| (key, input.finalize()))
                .collect(),
            ..self
        }
    }
}
