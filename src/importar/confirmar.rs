use crate::colaboradores::ServidorOferta;
use crate::models::{ResultadoConfirm, VistaPrevia};

/// Segunda fase del import: exige que la última pasada de validación no haya
/// dejado filas con error; si las hay, se rechaza localmente y el sistema
/// externo no llega a invocarse. Si la compuerta pasa, el archivo original y
/// la gestión se entregan tal cual al colaborador y su resultado se devuelve
/// sin reconciliar contra las filas locales.
pub fn confirmar_oferta(
    previa: &VistaPrevia,
    archivo: &[u8],
    gestion: &str,
    servidor: &dyn ServidorOferta,
) -> Result<ResultadoConfirm, Box<dyn std::error::Error>> {
    if previa.resumen.error > 0 {
        return Err(format!(
            "no se puede confirmar: hay {} fila(s) con error; corrija el archivo y vuelva a validar",
            previa.resumen.error
        )
        .into());
    }
    servidor.confirmar(archivo, gestion)
}
