#[cfg(target_arch = "wasm32")]
fn main() -> anyhow::Result<()> {
    tennis_emulator_web::launch_web()
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    anyhow::bail!("tennis-emulator-web runs in the browser; serve it with `dx serve --platform web`")
}
