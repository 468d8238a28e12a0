pub mod packets;
pub mod status;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

pub use status::EstadoInscripcion;

macro_rules! id_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Deserialize, Serialize, Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
        #[serde(transparent)]
        pub struct $name(pub u32);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}

id_type!(
    /// Registration number of a professor or a student, their primary key
    Legajo
);
id_type!(CursoId);
id_type!(InscripcionId);
id_type!(NotaId);

// 0 is what the selection boxes hold until something is picked
impl Legajo {
    pub const UNSELECTED: Self = Self(0);

    pub fn is_selected(self) -> bool {
        self != Self::UNSELECTED
    }
}

impl CursoId {
    pub const UNSELECTED: Self = Self(0);

    pub fn is_selected(self) -> bool {
        self != Self::UNSELECTED
    }
}

fn active() -> bool {
    true
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Profesor {
    pub legajo_profesor: Legajo,
    pub nombre: String,
    pub apellido: String,
    pub dni: String,
    pub email: String,
    pub fecha_nacimiento: String,
    #[serde(default)]
    pub telefono: Option<String>,
    #[serde(default)]
    pub especialidades: Option<String>,
    #[serde(default = "active")]
    pub activo: bool,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Alumno {
    pub legajo_alumno: Legajo,
    pub nombre: String,
    pub apellido: String,
    pub dni: String,
    pub email: String,
    pub fecha_nacimiento: String,
    #[serde(default)]
    pub telefono: Option<String>,
    #[serde(default = "active")]
    pub activo: bool,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Curso {
    pub id: CursoId,
    pub nombre: String,
    #[serde(default)]
    pub descripcion: Option<String>,
    /// in hours
    pub duracion: u32,
    #[serde(default = "active")]
    pub activo: bool,
    #[serde(default)]
    pub profesor: Option<Profesor>,
    #[serde(default)]
    pub profesor_legajo: Option<Legajo>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Inscripcion {
    pub id: InscripcionId,
    pub alumno_legajo: Legajo,
    pub curso_id: CursoId,
    pub estado: EstadoInscripcion,
    pub alumno: Alumno,
    pub curso: Curso,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub notas: Vec<Nota>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Nota {
    pub id: NotaId,
    pub nombre_evaluacion: String,
    /// 0.00 to 10.00
    #[serde(deserialize_with = "decimal")]
    pub calificacion: f64,
    #[serde(deserialize_with = "timestamp")]
    pub fecha_registro: DateTime<Utc>,
    pub inscripcion_id: InscripcionId,
}

impl Profesor {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.nombre, self.apellido)
    }
}

impl Alumno {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.nombre, self.apellido)
    }
}

impl Curso {
    /// who teaches it, as shown in the course table
    pub fn professor_label(&self) -> String {
        let legajo = self
            .profesor_legajo
            .or(self.profesor.as_ref().map(|p| p.legajo_profesor));
        let legajo = legajo.map(|l| l.to_string()).unwrap_or_else(|| "-".to_string());
        match &self.profesor {
            Some(profesor) => format!("{} (Legajo: {})", profesor.nombre, legajo),
            None => format!("Legajo: {}", legajo),
        }
    }
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<Vec<T>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// decimal columns come back as strings ("8.50") from the backend, sometimes as plain numbers
fn decimal<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Decimal {
        Number(f64),
        Text(String),
    }

    match Decimal::deserialize(deserializer)? {
        Decimal::Number(value) => Ok(value),
        Decimal::Text(text) => text
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("invalid decimal: {text}"))),
    }
}

fn timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let text = String::deserialize(deserializer)?;
    if let Ok(date) = DateTime::parse_from_rfc3339(&text) {
        return Ok(date.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(&text, format).ok())
        .map(|naive| naive.and_utc())
        .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {text}")))
}
