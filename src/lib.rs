// Biblioteca raíz del crate `aulaflow`: núcleo de marcado de asistencia e
// import masivo de ofertas para la programación académica de un departamento.

pub mod asistencia;
pub mod colaboradores;
pub mod importar;
pub mod models;
pub mod server;

/// Ejecuta el servidor HTTP (reexport para facilitar uso desde `main`)
pub use server::{Estado, run_server};
