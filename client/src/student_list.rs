use crate::collection::{self, Collection, RowAction};
use common::{Alumno, Legajo};

pub const EMPTY: &str = "No hay alumnos activos para mostrar.";

pub fn show(ui: &mut egui::Ui, alumnos: &Collection<Alumno>) -> RowAction<Alumno, Legajo> {
    let Some(rows) = alumnos.view().show_placeholder(ui, EMPTY) else {
        return RowAction::None;
    };

    let mut action = RowAction::None;
    egui::Grid::new("student_list")
        .striped(true)
        .num_columns(5)
        .show(ui, |ui| {
            collection::header(ui, &["Legajo", "Nombre Completo", "Email", "DNI", "Acciones"]);
            for alumno in rows {
                ui.label(alumno.legajo_alumno.to_string());
                ui.label(alumno.full_name());
                ui.label(&alumno.email);
                ui.label(&alumno.dni);
                ui.horizontal(|ui| {
                    if ui.button("Editar").clicked() {
                        action = RowAction::Edit(alumno.clone());
                    }
                    if ui.button("Eliminar").clicked() {
                        action = RowAction::Delete(alumno.legajo_alumno);
                    }
                });
                ui.end_row();
            }
        });
    action
}
