/// Bodies sent to the academic API
pub mod c2s {
    use crate::{Alumno, CursoId, Curso, EstadoInscripcion, InscripcionId, Legajo, Profesor};
    use serde::{Deserialize, Serialize};

    /// POST /profesores, PATCH /profesores/{legajo}
    #[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
    #[serde(rename_all = "camelCase")]
    pub struct ProfesorDto {
        pub nombre: String,
        pub apellido: String,
        pub dni: String,
        pub email: String,
        /// YYYY-MM-DD
        pub fecha_nacimiento: String,
        #[serde(default, skip_serializing_if = "String::is_empty")]
        pub telefono: String,
        #[serde(default, skip_serializing_if = "String::is_empty")]
        pub especialidades: String,
    }

    impl From<&Profesor> for ProfesorDto {
        fn from(profesor: &Profesor) -> Self {
            Self {
                nombre: profesor.nombre.clone(),
                apellido: profesor.apellido.clone(),
                dni: profesor.dni.clone(),
                email: profesor.email.clone(),
                fecha_nacimiento: profesor.fecha_nacimiento.clone(),
                telefono: profesor.telefono.clone().unwrap_or_default(),
                especialidades: profesor.especialidades.clone().unwrap_or_default(),
            }
        }
    }

    /// POST /alumnos, PATCH /alumnos/{legajo}
    #[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
    #[serde(rename_all = "camelCase")]
    pub struct AlumnoDto {
        pub nombre: String,
        pub apellido: String,
        pub dni: String,
        pub email: String,
        /// YYYY-MM-DD
        pub fecha_nacimiento: String,
        #[serde(default, skip_serializing_if = "String::is_empty")]
        pub telefono: String,
    }

    impl From<&Alumno> for AlumnoDto {
        fn from(alumno: &Alumno) -> Self {
            Self {
                nombre: alumno.nombre.clone(),
                apellido: alumno.apellido.clone(),
                dni: alumno.dni.clone(),
                email: alumno.email.clone(),
                fecha_nacimiento: alumno.fecha_nacimiento.clone(),
                telefono: alumno.telefono.clone().unwrap_or_default(),
            }
        }
    }

    /// POST /cursos, PATCH /cursos/{id}
    #[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
    #[serde(rename_all = "camelCase")]
    pub struct CursoDto {
        pub nombre: String,
        #[serde(default, skip_serializing_if = "String::is_empty")]
        pub descripcion: String,
        pub duracion: u32,
        pub profesor_legajo: Legajo,
    }

    impl From<&Curso> for CursoDto {
        fn from(curso: &Curso) -> Self {
            Self {
                nombre: curso.nombre.clone(),
                descripcion: curso.descripcion.clone().unwrap_or_default(),
                duracion: curso.duracion,
                profesor_legajo: curso
                    .profesor_legajo
                    .or(curso.profesor.as_ref().map(|p| p.legajo_profesor))
                    .unwrap_or(Legajo::UNSELECTED),
            }
        }
    }

    /// POST /inscripciones
    #[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Default)]
    #[serde(rename_all = "camelCase")]
    pub struct CreateInscripcion {
        pub alumno_legajo: Legajo,
        pub curso_id: CursoId,
    }

    /// POST /notas
    #[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
    #[serde(rename_all = "camelCase")]
    pub struct CreateNota {
        pub nombre_evaluacion: String,
        pub calificacion: f64,
        pub inscripcion_id: InscripcionId,
    }

    /// PATCH /inscripciones/{id}
    #[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq)]
    pub struct UpdateEstado {
        pub estado: EstadoInscripcion,
    }
}

/// Bodies received from the academic API besides the entities themselves
pub mod s2c {
    use serde::{Deserialize, Serialize};

    /// validation layer answer, `{ "message": "..." }` or `{ "message": ["...", "..."] }`
    #[derive(Deserialize, Serialize, Debug, Clone, Default)]
    pub struct ErrorBody {
        #[serde(default)]
        pub message: Option<Message>,
    }

    #[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
    #[serde(untagged)]
    pub enum Message {
        One(String),
        Many(Vec<String>),
    }

    impl Message {
        pub fn into_list(self) -> Vec<String> {
            match self {
                Message::One(message) => vec![message],
                Message::Many(messages) => messages,
            }
        }
    }

    impl ErrorBody {
        /// None when the body is not the validation layer shape
        pub fn parse(bytes: &[u8]) -> Option<Vec<String>> {
            let body: ErrorBody = serde_json::from_slice(bytes).ok()?;
            body.message.map(Message::into_list)
        }
    }
}
