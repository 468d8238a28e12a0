use crate::collection::{self, Collection, RowAction};
use common::{Legajo, Profesor};

pub const EMPTY: &str = "No hay profesores activos para mostrar.";

pub fn show(ui: &mut egui::Ui, profesores: &Collection<Profesor>) -> RowAction<Profesor, Legajo> {
    let Some(rows) = profesores.view().show_placeholder(ui, EMPTY) else {
        return RowAction::None;
    };

    let mut action = RowAction::None;
    egui::Grid::new("professor_list")
        .striped(true)
        .num_columns(5)
        .show(ui, |ui| {
            collection::header(ui, &["Legajo", "Nombre Completo", "Email", "DNI", "Acciones"]);
            for profesor in rows {
                ui.label(profesor.legajo_profesor.to_string());
                ui.label(profesor.full_name());
                ui.label(&profesor.email);
                ui.label(&profesor.dni);
                ui.horizontal(|ui| {
                    if ui.button("Editar").clicked() {
                        action = RowAction::Edit(profesor.clone());
                    }
                    if ui.button("Eliminar").clicked() {
                        action = RowAction::Delete(profesor.legajo_profesor);
                    }
                });
                ui.end_row();
            }
        });
    action
}
