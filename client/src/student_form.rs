use crate::api::{ApiError, Method, Submission};
use crate::form::{self, EntityForm, ErrorMessages, Feedback, FormEvent};
use common::packets::c2s::AlumnoDto;
use common::{Alumno, Legajo};
use log::error;

fn other_status(status: u16, status_text: &str) -> String {
    format!("Error: {status} {status_text}")
}

const MESSAGES: ErrorMessages = ErrorMessages {
    not_found: Some("Alumno no encontrado."),
    conflict: None,
    network: "Error de conexión: no se pudo guardar el alumno.",
    other: other_status,
};

pub struct StudentForm {
    draft: AlumnoDto,
    target: Option<Legajo>,
    feedback: Feedback,
}

impl StudentForm {
    pub fn draft(&self) -> &AlumnoDto {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut AlumnoDto {
        &mut self.draft
    }

    pub fn feedback(&self) -> &Feedback {
        &self.feedback
    }
}

impl EntityForm for StudentForm {
    type Entity = Alumno;

    fn create() -> Self {
        Self {
            draft: AlumnoDto::default(),
            target: None,
            feedback: Feedback::default(),
        }
    }

    fn edit(alumno: &Alumno) -> Self {
        Self {
            draft: AlumnoDto::from(alumno),
            target: Some(alumno.legajo_alumno),
            feedback: Feedback::default(),
        }
    }

    fn is_edit(&self) -> bool {
        self.target.is_some()
    }

    fn submit(&mut self) -> Option<Submission> {
        self.feedback.clear();
        let draft = &self.draft;
        let missing = form::missing(&[
            ("Nombre", draft.nombre.as_str()),
            ("Apellido", draft.apellido.as_str()),
            ("DNI", draft.dni.as_str()),
            ("Email", draft.email.as_str()),
            ("Fecha de Nacimiento", draft.fecha_nacimiento.as_str()),
        ]);
        if !missing.is_empty() {
            self.feedback.set_error(form::missing_message(&missing));
            return None;
        }

        let (method, path) = match self.target {
            None => (Method::Post, "/alumnos".to_string()),
            Some(legajo) => (Method::Patch, format!("/alumnos/{legajo}")),
        };
        match Submission::json(method, path, &self.draft) {
            Ok(submission) => Some(submission),
            Err(e) => {
                self.feedback.set_error(form::describe(&e, &MESSAGES));
                None
            }
        }
    }

    fn on_response(&mut self, result: Result<Alumno, ApiError>) -> bool {
        match result {
            Ok(alumno) => {
                let message = if self.is_edit() {
                    format!("Alumno \"{}\" actualizado.", alumno.nombre)
                } else {
                    format!(
                        "Alumno \"{}\" creado con legajo {}.",
                        alumno.nombre, alumno.legajo_alumno
                    )
                };
                self.feedback.set_success(message);
                self.draft = AlumnoDto::default();
                true
            }
            Err(e) => {
                error!("Failed to save student: {e}");
                self.feedback.set_error(form::describe(&e, &MESSAGES));
                false
            }
        }
    }

    fn update(&mut self, ui: &mut egui::Ui) -> FormEvent {
        egui::Grid::new("student_form")
            .num_columns(2)
            .spacing([12.0, 8.0])
            .show(ui, |ui| {
                let draft = &mut self.draft;
                form::text_row(ui, "Nombre", &mut draft.nombre, "");
                form::text_row(ui, "Apellido", &mut draft.apellido, "");
                form::text_row(ui, "DNI", &mut draft.dni, "");
                form::text_row(ui, "Email", &mut draft.email, "nombre@dominio.com");
                form::text_row(ui, "Fecha de Nacimiento", &mut draft.fecha_nacimiento, "AAAA-MM-DD");
                form::text_row(ui, "Teléfono (Opcional)", &mut draft.telefono, "");
            });

        ui.add_space(8.0);
        let (cancel, save) = form::buttons(ui, "Guardar Alumno", true);
        self.feedback.show(ui);

        if cancel {
            FormEvent::Cancel
        } else if save {
            self.submit().map(FormEvent::Submit).unwrap_or(FormEvent::None)
        } else {
            FormEvent::None
        }
    }
}
