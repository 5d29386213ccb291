// --- Núcleo de Asistencia y Ofertas - Archivo principal ---

use std::path::Path;
use std::sync::Arc;

use aulaflow::colaboradores::archivo::{OfertaArchivo, SesionesArchivo};
use aulaflow::{Estado, run_server};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();

    let bind = std::env::var("AULAFLOW_BIND").unwrap_or_else(|_| "127.0.0.1:8080".to_string());
    let data_dir = std::env::var("AULAFLOW_DATA").unwrap_or_else(|_| "data".to_string());

    let estado = Estado {
        servidor: Arc::new(OfertaArchivo::new(Path::new(&data_dir))),
        sesiones: Arc::new(SesionesArchivo::new(Path::new(&data_dir))),
    };

    println!("=== Aulaflow - Asistencia y Ofertas (API) ===");
    println!("Datos en '{}', iniciando servidor en http://{}", data_dir, bind);
    run_server(&bind, estado).await
}
