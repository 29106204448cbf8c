use macroquad::prelude::*;
use tracing::{info, warn};

use finch_sim::{DisplayError, DisplaySurface, MimeBundle, MimeType};

const PNG_SIGNATURE: &[u8] = b"\x89PNG\r\n\x1a\n";

// Function to configure the macroquad window
fn window_conf() -> Conf {
    Conf {
        window_title: "Finch Simulator".to_string(),
        window_width: 800,
        window_height: 600,
        high_dpi: true,
        ..Default::default()
    }
}

/// A macroquad window acting as a display surface for the PNG rendering.
#[derive(Default)]
pub struct WindowSurface {
    png: Option<Vec<u8>>,
}

impl DisplaySurface for WindowSurface {
    fn accepts(&self) -> &[MimeType] {
        &[MimeType::Png]
    }

    fn display(&mut self, bundle: MimeBundle) -> Result<(), DisplayError> {
        let png = bundle.png().ok_or(DisplayError::Unsupported(MimeType::Png))?;
        if !png.starts_with(PNG_SIGNATURE) {
            return Err(DisplayError::Surface(format!(
                "{} bytes are not a PNG image",
                png.len()
            )));
        }
        self.png = Some(png.to_vec());
        Ok(())
    }
}

impl WindowSurface {
    /// Opens the window and blocks until it is closed.
    pub fn run(self) {
        let Some(png) = self.png else {
            warn!("Nothing was displayed, not opening a window.");
            return;
        };
        info!("Opening viewer window. Press Esc to close.");
        macroquad::Window::from_config(window_conf(), draw_loop(png));
    }
}

async fn draw_loop(png: Vec<u8>) {
    let texture = Texture2D::from_file_with_format(&png, None);

    loop {
        clear_background(LIGHTGRAY);

        let x = ((screen_width() - texture.width()) / 2.0).max(0.0);
        let y = ((screen_height() - texture.height()) / 2.0).max(0.0);
        draw_texture(&texture, x, y, WHITE);
        draw_text("Esc to close", 10.0, 20.0, 20.0, BLACK);

        if is_key_pressed(KeyCode::Escape) {
            break;
        }
        next_frame().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_png_bytes() {
        let mut png = PNG_SIGNATURE.to_vec();
        png.extend_from_slice(b"IHDR");
        let mut window = WindowSurface::default();
        window.display(MimeBundle::new(None, Some(png.clone()))).unwrap();
        assert_eq!(window.png, Some(png));
    }

    #[test]
    fn test_rejects_missing_or_foreign_bytes() {
        let mut window = WindowSurface::default();
        assert!(matches!(
            window.display(MimeBundle::new(Some("<svg/>".to_string()), None)),
            Err(DisplayError::Unsupported(MimeType::Png))
        ));
        assert!(matches!(
            window.display(MimeBundle::new(None, Some(b"GIF89a".to_vec()))),
            Err(DisplayError::Surface(_))
        ));
        assert_eq!(window.png, None);
    }
}
