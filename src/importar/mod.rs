//! Módulo `importar`: pipeline de carga masiva de oferta académica.
//!
//! Submódulos:
//! - `parser`: filtrado de líneas, cabecera y extracción de filas
//! - `validacion`: cadena de reglas por fila y agregación del resumen
//! - `plantilla`: CSV de ejemplo descargable
//! - `confirmar`: compuerta local y delegación al sistema externo

/// Parseo del CSV mínimo: `validar_oferta`
mod parser;

/// Reglas por fila y resumen: `validar_fila`, `resumir`
mod validacion;

/// Plantilla estática de descarga
mod plantilla;

/// Confirmación en dos fases: `confirmar_oferta`
mod confirmar;

pub use confirmar::confirmar_oferta;
pub use parser::{COLUMNAS_REQUERIDAS, validar_oferta};
pub use plantilla::PLANTILLA_CSV;
pub use validacion::{resumir, validar_fila};
