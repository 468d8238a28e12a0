use crate::api::{ApiError, Method, Submission};
use crate::form::{self, Feedback, FormEvent};
use common::packets::c2s::CreateNota;
use common::Inscripcion;
use log::error;

/// seconds the success message stays on screen
pub const CLOSE_DELAY: f64 = 1.5;

pub const NO_TARGET: &str = "Error interno: Inscripción no seleccionada.";
pub const INVALID_GRADE: &str = "La calificación debe ser un número válido entre 0.00 y 10.00.";

/// Shared grade entry dialog of the enrollment list
#[derive(Default)]
pub struct GradeDialog {
    target: Option<Inscripcion>,
    nombre_evaluacion: String,
    calificacion: String,
    feedback: Feedback,
    close_at: Option<f64>,
}

impl GradeDialog {
    pub fn open(&mut self, inscripcion: Inscripcion) {
        *self = Self {
            target: Some(inscripcion),
            ..Self::default()
        };
    }

    pub fn close(&mut self) {
        *self = Self::default();
    }

    pub fn is_open(&self) -> bool {
        self.target.is_some()
    }

    pub fn target(&self) -> Option<&Inscripcion> {
        self.target.as_ref()
    }

    pub fn feedback(&self) -> &Feedback {
        &self.feedback
    }

    pub fn set_input(&mut self, nombre_evaluacion: &str, calificacion: &str) {
        self.nombre_evaluacion = nombre_evaluacion.to_string();
        self.calificacion = calificacion.to_string();
    }

    fn parse_grade(&self) -> Option<f64> {
        let value: f64 = self.calificacion.trim().replace(',', ".").parse().ok()?;
        (0.0..=10.0).contains(&value).then_some(value)
    }

    pub fn submit(&mut self) -> Option<Submission> {
        self.feedback.clear();
        let Some(inscripcion) = &self.target else {
            self.feedback.set_error(NO_TARGET);
            return None;
        };
        let missing = form::missing(&[("Evaluación", self.nombre_evaluacion.as_str())]);
        if !missing.is_empty() {
            self.feedback.set_error(form::missing_message(&missing));
            return None;
        }
        let Some(calificacion) = self.parse_grade() else {
            self.feedback.set_error(INVALID_GRADE);
            return None;
        };

        let body = CreateNota {
            nombre_evaluacion: self.nombre_evaluacion.trim().to_string(),
            calificacion,
            inscripcion_id: inscripcion.id,
        };
        match Submission::json(Method::Post, "/notas", &body) {
            Ok(submission) => Some(submission),
            Err(e) => {
                self.feedback.set_error(e.to_string());
                None
            }
        }
    }

    /// `now` is the ui clock in seconds, the dialog closes itself [`CLOSE_DELAY`] later
    pub fn on_response(&mut self, result: Result<(), ApiError>, now: f64) -> bool {
        match result {
            Ok(()) => {
                let value = self.parse_grade().unwrap_or_default();
                self.feedback
                    .set_success(format!("Nota {value:.2} registrada con éxito."));
                self.close_at = Some(now + CLOSE_DELAY);
                true
            }
            Err(e) => {
                error!("Failed to register grade: {e}");
                let message = match &e {
                    ApiError::Status {
                        messages: Some(list),
                        ..
                    } if !list.is_empty() => list.join(", "),
                    ApiError::Network(_) => "Error de conexión o datos inválidos.".to_string(),
                    _ => "Error al registrar la nota.".to_string(),
                };
                self.feedback.set_error(message);
                false
            }
        }
    }

    /// Returns the seconds left before closing, if a close is pending
    pub fn tick(&mut self, now: f64) -> Option<f64> {
        let close_at = self.close_at?;
        if now >= close_at {
            self.close();
            None
        } else {
            Some(close_at - now)
        }
    }

    pub fn show(&mut self, ctx: &egui::Context) -> FormEvent {
        let Some(inscripcion) = &self.target else {
            return FormEvent::None;
        };
        let title = format!("Registrar Nota: Inscripción #{}", inscripcion.id);
        let alumno = inscripcion.alumno.full_name();
        let curso = inscripcion.curso.nombre.clone();

        let mut event = FormEvent::None;
        egui::Window::new(title)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(format!("Alumno: {alumno}"));
                ui.label(format!("Curso: {curso}"));
                ui.separator();

                let waiting = self.close_at.is_some();
                ui.add_enabled_ui(!waiting, |ui| {
                    egui::Grid::new("grade_dialog")
                        .num_columns(2)
                        .spacing([12.0, 8.0])
                        .show(ui, |ui| {
                            form::text_row(
                                ui,
                                "Evaluación",
                                &mut self.nombre_evaluacion,
                                "Parcial 1",
                            );
                            form::text_row(ui, "Calificación", &mut self.calificacion, "0.00 - 10.00");
                        });
                    ui.add_space(8.0);
                    let (cancel, save) = form::buttons(ui, "Registrar Nota", true);
                    if cancel {
                        event = FormEvent::Cancel;
                    } else if save {
                        if let Some(submission) = self.submit() {
                            event = FormEvent::Submit(submission);
                        }
                    }
                });
                self.feedback.show(ui);
            });
        event
    }
}
