//! Interfaces hacia los sistemas externos. El core sólo calcula (ventana de
//! marcado, validación local); toda persistencia y todo chequeo contra
//! catálogos vivos pasa por estos traits.

use chrono::NaiveDate;

use crate::models::{MarcaAsistencia, ResultadoConfirm, SesionProgramada, VistaPrevia};

/// Implementaciones respaldadas en archivos JSON/CSV locales
pub mod archivo;

/// Vista previa y confirmación de ofertas en el sistema externo. Se usa para
/// archivos que no se parsean localmente (planillas) y para la fase de
/// persistencia del confirm; la forma del resultado es la misma que la de la
/// validación local, el origen es distinto.
pub trait ServidorOferta: Send + Sync {
    fn preview(
        &self,
        archivo: &[u8],
        gestion: &str,
    ) -> Result<VistaPrevia, Box<dyn std::error::Error>>;

    fn confirmar(
        &self,
        archivo: &[u8],
        gestion: &str,
    ) -> Result<ResultadoConfirm, Box<dyn std::error::Error>>;
}

/// Persistencia de sesiones y marcas de asistencia. La escritura de la marca
/// es responsabilidad de este colaborador; el core sólo decide si la ventana
/// está abierta.
pub trait RepositorioSesiones: Send + Sync {
    fn listar_sesiones(
        &self,
        fecha: NaiveDate,
    ) -> Result<Vec<SesionProgramada>, Box<dyn std::error::Error>>;

    fn marcar_asistencia(
        &self,
        marca: &MarcaAsistencia,
    ) -> Result<bool, Box<dyn std::error::Error>>;
}
