// Ventana de marcado de asistencia y etiquetas de día.
//
// Todo aquí es cálculo puro sobre los argumentos: el "ahora" lo entrega el
// llamador (la UI refresca cada 30s), no se lee reloj ni zona horaria.

use chrono::{Duration, NaiveDateTime};

use crate::models::{EstadoMarcado, SesionProgramada};

/// Minutos antes de `hora_inicio` en que se abre la ventana de marcado.
pub const MINUTOS_ANTES: i64 = 15;
/// Minutos después de `hora_fin` en que se cierra la ventana de marcado.
pub const MINUTOS_DESPUES: i64 = 30;

/// Etiquetas de día indexadas 1..7 (1 = Lunes).
const DIAS: [&str; 7] = [
    "Lunes",
    "Martes",
    "Miércoles",
    "Jueves",
    "Viernes",
    "Sábado",
    "Domingo",
];

/// Instantes de apertura y cierre de la ventana de marcado para una sesión:
/// `fecha + hora_inicio - 15min` y `fecha + hora_fin + 30min`, en hora local
/// naive (sin conversión a UTC ni corrección por cambio de hora).
pub fn ventana_marcado(sesion: &SesionProgramada) -> (NaiveDateTime, NaiveDateTime) {
    let apertura = sesion.fecha.and_time(sesion.hora_inicio) - Duration::minutes(MINUTOS_ANTES);
    let cierre = sesion.fecha.and_time(sesion.hora_fin) + Duration::minutes(MINUTOS_DESPUES);
    (apertura, cierre)
}

/// True si la acción de marcar asistencia está habilitada en `ahora`:
/// la ventana es inclusiva en ambos extremos, y una sesión ya marcada
/// (estado terminal) nunca se habilita de nuevo.
pub fn marcado_habilitado(sesion: &SesionProgramada, ahora: NaiveDateTime) -> bool {
    if sesion.estado != EstadoMarcado::SinMarcar {
        return false;
    }
    let (apertura, cierre) = ventana_marcado(sesion);
    apertura <= ahora && ahora <= cierre
}

/// Etiqueta del día 1..7 -> Lunes..Domingo. Índices fuera de rango devuelven
/// cadena vacía, nunca panic (la UI muestra la etiqueta tal cual).
pub fn etiqueta_dia(dia: u8) -> &'static str {
    match dia {
        1..=7 => DIAS[(dia - 1) as usize],
        _ => "",
    }
}
