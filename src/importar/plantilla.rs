/// Plantilla descargable con la cabecera requerida y dos filas de ejemplo.
/// Es una constante estática, no se genera desde datos vivos.
pub const PLANTILLA_CSV: &str = "carrera_sigla,materia_codigo,paralelo,turno,capacidad\n\
SIS,INF-121,A,manana,40\n\
SIS,MAT-101,B,tarde,35\n";
