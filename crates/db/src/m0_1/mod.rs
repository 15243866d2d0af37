mod daily_menu_create_table;
mod tracking_create_table;

use sqlx_migrator::vec_box;

pub struct Migration;

sqlx_migrator::sqlite_migration!(
    Migration,
    "glucoplan",
    "m0_1",
    vec_box![],
    vec_box![
        daily_menu_create_table::Operation,
        tracking_create_table::Operation
    ]
);
