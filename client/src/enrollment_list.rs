use crate::api::{ApiError, Submission};
use crate::collection::{self, Collection};
use crate::form::FormEvent;
use crate::grade_dialog::GradeDialog;
use common::{EstadoInscripcion, Inscripcion, InscripcionId, Nota};
use egui::{Color32, RichText};
use log::{error, warn};

pub const EMPTY: &str = "No hay inscripciones.";
pub const NO_GRADES: &str = "No hay notas registradas.";

/// At most one row shows its grades
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Expansion {
    #[default]
    Collapsed,
    Expanded(InscripcionId),
}

impl Expansion {
    pub fn toggle(&mut self, id: InscripcionId) {
        *self = match *self {
            Expansion::Expanded(open) if open == id => Expansion::Collapsed,
            _ => Expansion::Expanded(id),
        };
    }

    pub fn is_expanded(self, id: InscripcionId) -> bool {
        self == Expansion::Expanded(id)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum EnrollmentAction {
    None,
    ChangeStatus {
        id: InscripcionId,
        estado: EstadoInscripcion,
    },
    RegisterGrade {
        id: InscripcionId,
        submission: Submission,
    },
    Delete(InscripcionId),
}

pub fn status_color(estado: EstadoInscripcion) -> Color32 {
    match estado {
        EstadoInscripcion::Inscrito => Color32::GRAY,
        EstadoInscripcion::Activo => Color32::from_rgb(25, 118, 210),
        EstadoInscripcion::Completado => Color32::from_rgb(46, 125, 50),
        EstadoInscripcion::Retirado => Color32::from_rgb(211, 47, 47),
    }
}

pub fn grade_color(calificacion: f64) -> Color32 {
    if calificacion >= 6.0 {
        Color32::from_rgb(25, 118, 210)
    } else {
        Color32::from_rgb(237, 108, 2)
    }
}

#[derive(Default)]
pub struct EnrollmentList {
    expansion: Expansion,
    grade_dialog: GradeDialog,
}

impl EnrollmentList {
    pub fn expansion(&self) -> Expansion {
        self.expansion
    }

    pub fn toggle_grades(&mut self, id: InscripcionId) {
        self.expansion.toggle(id);
    }

    pub fn grade_dialog(&self) -> &GradeDialog {
        &self.grade_dialog
    }

    pub fn grade_dialog_mut(&mut self) -> &mut GradeDialog {
        &mut self.grade_dialog
    }

    /// Refused for finished or withdrawn enrollments
    pub fn open_grade_dialog(&mut self, inscripcion: &Inscripcion) -> bool {
        if !inscripcion.estado.accepts_grades() {
            warn!(
                "Enrollment {} is {}, no grade can be registered",
                inscripcion.id, inscripcion.estado
            );
            return false;
        }
        self.grade_dialog.open(inscripcion.clone());
        true
    }

    /// The answer only reaches the dialog while it still shows the enrollment the grade was sent for
    pub fn on_grade_registered(
        &mut self,
        id: InscripcionId,
        result: Result<(), ApiError>,
        now: f64,
    ) -> bool {
        if self.grade_dialog.target().map(|i| i.id) != Some(id) {
            if let Err(e) = &result {
                error!("Failed to register grade for enrollment {id}: {e}");
            }
            return result.is_ok();
        }
        self.grade_dialog.on_response(result, now)
    }

    pub fn tick(&mut self, now: f64) -> Option<f64> {
        self.grade_dialog.tick(now)
    }

    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        inscripciones: &Collection<Inscripcion>,
    ) -> EnrollmentAction {
        let mut action = EnrollmentAction::None;

        match self.grade_dialog.show(ui.ctx()) {
            FormEvent::Submit(submission) => {
                if let Some(id) = self.grade_dialog.target().map(|i| i.id) {
                    action = EnrollmentAction::RegisterGrade { id, submission };
                }
            }
            FormEvent::Cancel => self.grade_dialog.close(),
            FormEvent::None => {}
        }

        let Some(rows) = inscripciones.view().show_placeholder(ui, EMPTY) else {
            return action;
        };

        let mut toggled = None;
        let mut grade_for = None;
        egui::Grid::new("enrollment_list")
            .striped(true)
            .num_columns(5)
            .show(ui, |ui| {
                collection::header(ui, &["ID", "Alumno", "Curso", "Estado", "Acciones"]);
                for inscripcion in rows {
                    let id = inscripcion.id;
                    ui.label(id.to_string());
                    ui.label(inscripcion.alumno.full_name());
                    ui.label(&inscripcion.curso.nombre);
                    collection::chip(
                        ui,
                        inscripcion.estado.as_str(),
                        status_color(inscripcion.estado),
                    );
                    ui.horizontal(|ui| {
                        let expanded = self.expansion.is_expanded(id);
                        let label = if expanded { "Ocultar Notas" } else { "Ver Notas" };
                        let has_grades = !inscripcion.notas.is_empty();
                        if ui.add_enabled(has_grades, egui::Button::new(label)).clicked() {
                            toggled = Some(id);
                        }

                        ui.menu_button("Cambiar Estado", |ui| {
                            for &estado in inscripcion.estado.transition_targets() {
                                if ui.button(format!("Marcar como {estado}")).clicked() {
                                    action = EnrollmentAction::ChangeStatus { id, estado };
                                    ui.close_menu();
                                }
                            }
                        });

                        let can_grade = inscripcion.estado.accepts_grades();
                        if ui.add_enabled(can_grade, egui::Button::new("Nota")).clicked() {
                            grade_for = Some(inscripcion);
                        }
                        if ui.button("Eliminar").clicked() {
                            action = EnrollmentAction::Delete(id);
                        }
                    });
                    ui.end_row();

                    if self.expansion.is_expanded(id) {
                        ui.label("");
                        ui.vertical(|ui| show_grades(ui, id, &inscripcion.notas));
                        ui.end_row();
                    }
                }
            });

        if let Some(id) = toggled {
            self.toggle_grades(id);
        }
        if let Some(inscripcion) = grade_for {
            self.open_grade_dialog(inscripcion);
        }
        action
    }
}

fn show_grades(ui: &mut egui::Ui, id: InscripcionId, notas: &[Nota]) {
    if notas.is_empty() {
        ui.label(NO_GRADES);
        return;
    }
    egui::Grid::new(("grades", id))
        .striped(true)
        .num_columns(3)
        .show(ui, |ui| {
            collection::header(ui, &["Evaluación", "Calificación", "Fecha"]);
            for nota in notas {
                ui.label(&nota.nombre_evaluacion);
                ui.label(
                    RichText::new(format!("{:.2}", nota.calificacion))
                        .color(grade_color(nota.calificacion))
                        .strong(),
                );
                ui.label(nota.fecha_registro.format("%d/%m/%Y").to_string());
                ui.end_row();
            }
        });
}
