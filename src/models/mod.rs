// Estructuras de datos principales

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// Estado de marcado de asistencia para una sesión en una fecha concreta.
/// El marcado es de una sola vez: `SinMarcar` puede pasar a cualquiera de los
/// estados terminales, y de un estado terminal no se sale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum EstadoMarcado {
    #[default]
    #[serde(rename = "unset")]
    SinMarcar,
    #[serde(rename = "present")]
    Presente,
    #[serde(rename = "absent")]
    Ausente,
    #[serde(rename = "justified")]
    Justificado,
}

/// Sesión programada de un grupo: ocurrencia concreta (fecha) de un horario
/// semanal. `hora_inicio < hora_fin` es contrato del llamador; las sesiones
/// nocturnas que cruzan medianoche no están soportadas.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SesionProgramada {
    pub id: i64,
    pub materia: String,
    pub paralelo: String,
    /// 1 = Lunes .. 7 = Domingo
    pub dia_semana: u8,
    pub fecha: NaiveDate,
    pub hora_inicio: NaiveTime,
    pub hora_fin: NaiveTime,
    #[serde(default)]
    pub estado: EstadoMarcado,
}

/// Turno diario. Sólo se validan las tres etiquetas literales en minúscula;
/// el rango horario asociado a cada turno se configura en el servidor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Turno {
    Manana,
    Tarde,
    Noche,
}

impl Turno {
    /// Parsea la etiqueta literal (`manana`/`tarde`/`noche`); cualquier otra
    /// cosa (mayúsculas, acentos, espacios internos) no es un turno válido.
    pub fn parse(tag: &str) -> Option<Turno> {
        match tag {
            "manana" => Some(Turno::Manana),
            "tarde" => Some(Turno::Tarde),
            "noche" => Some(Turno::Noche),
            _ => None,
        }
    }
}

/// Fila de la oferta con esquema fijo: exactamente las cinco columnas
/// requeridas, como texto crudo sin coerción de tipos (la validación decide
/// qué valores son aceptables).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilaOferta {
    pub carrera_sigla: String,
    pub materia_codigo: String,
    pub paralelo: String,
    pub turno: String,
    pub capacidad: String,
}

/// Veredicto por fila. La validación local sólo emite `Ok` o `Error`;
/// `Warn` existe porque la vista previa del servidor (que cruza contra
/// catálogos vivos) produce filas con la misma forma y sí lo usa.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EstadoFila {
    Ok,
    Warn,
    Error,
}

/// Una fila importada con su veredicto. `numero` es la posición 1-based en la
/// lista de líneas no vacías, contando la cabecera como línea 1 (la primera
/// fila de datos es la 2).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilaImportada {
    pub numero: usize,
    pub campos: FilaOferta,
    pub estado: EstadoFila,
    pub mensaje: Option<String>,
}

/// Conteos agregados de una pasada de validación. Se recalcula completo en
/// cada pasada; nunca se mezcla incrementalmente con resultados anteriores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumenImport {
    pub total: usize,
    pub ok: usize,
    pub warn: usize,
    pub error: usize,
}

/// Resultado de una pasada de validación: filas y resumen se producen juntos
/// y se reemplazan juntos. Misma forma tanto para la validación local como
/// para la vista previa del servidor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VistaPrevia {
    pub filas: Vec<FilaImportada>,
    pub resumen: ResumenImport,
}

/// Respuesta estructurada del sistema externo al confirmar un import.
/// Se muestra tal cual; no se reconcilia contra las filas locales.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultadoConfirm {
    #[serde(rename = "inserted")]
    pub insertados: usize,
    #[serde(rename = "updated")]
    pub actualizados: usize,
    #[serde(rename = "skipped")]
    pub omitidos: usize,
    #[serde(rename = "errors")]
    pub errores: usize,
}

/// Solicitud de marcado de asistencia. La escritura la hace el colaborador
/// de persistencia; este core sólo calcula si la ventana está abierta.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarcaAsistencia {
    pub sesion_id: i64,
    pub fecha: NaiveDate,
    pub estado: EstadoMarcado,
    pub justificacion: Option<String>,
}
