use banded3d::prelude::*;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config = RenderConfig::default();
    let mut engine = Engine::new(config)?;
    let mut window = Window::new("banded3d", config.width, config.height, DEFAULT_SCALE)?;
    let clock = window.clock();

    engine.start(clock.millis());
    let mut screenshots = 0u32;

    loop {
        match window.poll_events() {
            WindowEvent::Quit => break,
            WindowEvent::Screenshot => {
                let path = format!("banded3d-{screenshots:03}.png");
                window.frame().save(&path)?;
                log::info!("saved {path}");
                screenshots += 1;
            }
            WindowEvent::ToggleSpin => {
                let starfield = engine.starfield_mut();
                let spin = !starfield.spin();
                starfield.set_spin(spin);
                log::info!("star spin {}", if spin { "on" } else { "off" });
            }
            WindowEvent::None => {}
        }

        engine.step(&clock, &mut window)?;
        window.present()?;
        window.show_stats(engine.stats())?;
    }

    Ok(())
}
