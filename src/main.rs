//! the sitetheme cli
use {color_eyre::eyre::Result, sitetheme::app::SiteThemeApp};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let Some((mut app, command)) = SiteThemeApp::init().await? else {
        return Ok(());
    };

    app.run(command).await
}
