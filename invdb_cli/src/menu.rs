use invdb_core::engine::{BatchPlan, Expansion};
use invdb_core::storage::ForeignKeyTarget;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOption {
    Exit,
    ShowMarketplaces,
    CreateMarketplace,
    CreateInventoryItems,
    CreateGameInfo,
    CreateRegion,
    ShowRegions,
    DescribeTable,
}

impl MenuOption {
    pub const ALL: [MenuOption; 8] = [
        MenuOption::Exit,
        MenuOption::ShowMarketplaces,
        MenuOption::CreateMarketplace,
        MenuOption::CreateInventoryItems,
        MenuOption::CreateGameInfo,
        MenuOption::CreateRegion,
        MenuOption::ShowRegions,
        MenuOption::DescribeTable,
    ];

    pub fn number(self) -> usize {
        MenuOption::ALL
            .iter()
            .position(|o| *o == self)
            .unwrap_or_default()
    }

    pub fn description(self) -> &'static str {
        match self {
            MenuOption::Exit => "Exit",
            MenuOption::ShowMarketplaces => "Show all Marketplace entries",
            MenuOption::CreateMarketplace => "Create Marketplace entry",
            MenuOption::CreateInventoryItems => {
                "Create the GameInventoryItems entries for a new GameID"
            }
            MenuOption::CreateGameInfo => "Create GameInfo entry",
            MenuOption::CreateRegion => "Create Region entry",
            MenuOption::ShowRegions => "Show all Region entries",
            MenuOption::DescribeTable => "Describe a table's constraints",
        }
    }
}

pub fn render_menu() -> String {
    let mut out = String::from("Make a selection between the following options:");
    for option in MenuOption::ALL {
        out.push_str(&format!("\n{}: {}", option.number(), option.description()));
    }
    out
}

pub fn parse_choice(input: &str) -> Result<MenuOption, String> {
    let input = input.trim();
    if input.is_empty() || !input.chars().all(|c| c.is_ascii_digit()) {
        return Err("Input must be an integer".to_string());
    }
    input
        .parse::<usize>()
        .ok()
        .and_then(|n| MenuOption::ALL.get(n).copied())
        .ok_or_else(|| "Invalid option selected. Please choose a valid entry".to_string())
}

/// One row per content type and condition for a newly entered GameID.
pub fn inventory_plan() -> BatchPlan {
    BatchPlan::new(
        "GameInventoryItems",
        "GameID",
        vec![
            Expansion::new(
                "ContentType",
                ForeignKeyTarget::new("GamePackageContents", "ContentType"),
            ),
            Expansion::new("Condition", ForeignKeyTarget::new("Conditions", "Condition")),
        ],
    )
}

pub const GAME_INFO_COLUMNS: [&str; 5] = ["GameID", "Name", "Region", "Platform", "PriceChartingURL"];
