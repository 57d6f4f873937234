//! Generation prompt construction from the design payload

use crate::models::GameDesign;

/// How many units from the balancing sheet make it into the prompt
const MAX_PROMPT_UNITS: usize = 6;

/// Build the full generation prompt for a game design
pub fn build_prompt(design: &GameDesign) -> String {
    let genre = design.inputs.genre.as_deref().unwrap_or("RTS");

    let factions = join_or(
        design.game_design_spec.factions.iter().map(|f| f.name.as_str()),
        "Standard",
    );
    let resources = join_or(
        design
            .game_design_spec
            .economy
            .resources
            .iter()
            .map(|r| r.name.as_str()),
        "Gold, Energy",
    );
    let units = join_or(
        design
            .balancing
            .units
            .iter()
            .take(MAX_PROMPT_UNITS)
            .map(|u| u.unit_name.as_str()),
        "Infantry, Tank",
    );

    format!(
        "Create a STUNNING, PROFESSIONAL, FULL-SCREEN strategy game in a single HTML file.\n\
         \n\
         Game: {project}\n\
         Genre: {genre}\n\
         Factions: {factions}\n\
         Resources: {resources}\n\
         Units: {units}\n\
         \n\
         REQUIREMENTS:\n\
         - Full-screen layout (100vw x 100vh, no scrollbars)\n\
         - Professional dark theme with gradients\n\
         - Top bar (60px): Resources + Timer\n\
         - Main area (70%): Canvas/Grid gameplay\n\
         - Right panel (30%): Build menu\n\
         - Bottom bar (80px): Actions\n\
         - Smooth animations and effects\n\
         - Working resource system\n\
         - Buildable units with stats\n\
         - Combat system\n\
         - Win/loss detection\n\
         - Sound effects (Web Audio)\n\
         - Mobile responsive\n\
         \n\
         Return ONLY valid HTML (no markdown, no explanations). \
         Start with <!DOCTYPE html> and end with </html>.",
        project = design.project_name(),
        genre = genre,
        factions = factions,
        resources = resources,
        units = units,
    )
}

fn join_or<'a>(items: impl Iterator<Item = &'a str>, fallback: &str) -> String {
    let joined: Vec<&str> = items.filter(|s| !s.is_empty()).collect();
    if joined.is_empty() {
        fallback.to_string()
    } else {
        joined.join(", ")
    }
}
