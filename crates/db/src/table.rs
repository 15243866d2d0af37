use sea_query::Iden;

#[derive(Iden, Clone)]
pub enum DailyMenu {
    Table,
    UserId,
    Day,
    Pattern,
    LunchHasCarbs,
    Meals,
}

#[derive(Iden, Clone)]
pub enum Tracking {
    Table,
    UserId,
    Day,
    Record,
    UpdatedAt,
}
