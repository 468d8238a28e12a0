use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle of an enrollment. INSCRITO is set by the server at creation.
#[derive(Deserialize, Serialize, Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EstadoInscripcion {
    #[default]
    Inscrito,
    Activo,
    Completado,
    Retirado,
}

use EstadoInscripcion::{Activo, Completado, Inscrito, Retirado};

const MANUAL_TARGETS: [EstadoInscripcion; 3] = [Activo, Completado, Retirado];

/// What the status menu offers from each state.
/// Every state currently reaches every manual target, INSCRITO is never one.
static TRANSITIONS: [(EstadoInscripcion, &[EstadoInscripcion]); 4] = [
    (Inscrito, &MANUAL_TARGETS),
    (Activo, &MANUAL_TARGETS),
    (Completado, &MANUAL_TARGETS),
    (Retirado, &MANUAL_TARGETS),
];

impl EstadoInscripcion {
    pub const ALL: [Self; 4] = [Inscrito, Activo, Completado, Retirado];

    pub fn as_str(self) -> &'static str {
        match self {
            Inscrito => "INSCRITO",
            Activo => "ACTIVO",
            Completado => "COMPLETADO",
            Retirado => "RETIRADO",
        }
    }

    pub fn transition_targets(self) -> &'static [EstadoInscripcion] {
        TRANSITIONS
            .iter()
            .find(|(from, _)| *from == self)
            .map(|(_, targets)| *targets)
            .unwrap_or(&[])
    }

    pub fn can_transition(self, to: EstadoInscripcion) -> bool {
        self.transition_targets().contains(&to)
    }

    /// grades can only be registered while the enrollment is still running
    pub fn accepts_grades(self) -> bool {
        !self.is_terminal()
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Completado | Retirado)
    }
}

impl fmt::Display for EstadoInscripcion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_state_offers_the_three_manual_targets() {
        for from in EstadoInscripcion::ALL {
            assert_eq!(from.transition_targets(), &[Activo, Completado, Retirado]);
            assert!(!from.can_transition(Inscrito));
        }
        assert!(Completado.can_transition(Activo));
        assert!(Retirado.can_transition(Retirado));
    }

    #[test]
    fn terminal_states_refuse_grades() {
        assert!(Inscrito.accepts_grades());
        assert!(Activo.accepts_grades());
        assert!(!Completado.accepts_grades());
        assert!(!Retirado.accepts_grades());
    }

    #[test]
    fn wire_format() {
        for estado in EstadoInscripcion::ALL {
            let json = serde_json::to_string(&estado).unwrap();
            assert_eq!(json, format!("\"{}\"", estado));
            assert_eq!(serde_json::from_str::<EstadoInscripcion>(&json).unwrap(), estado);
        }
    }
}
