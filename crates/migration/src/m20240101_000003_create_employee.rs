//! Create `employees` table.
//!
//! Full-time and part-time employees share this table; `employee_type`
//! tells them apart and the variant columns are nullable.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Employee::Table)
                    .if_not_exists()
                    .col(pk_auto(Employee::Id))
                    .col(string_len(Employee::EmployeeType, 31))
                    .col(string_len(Employee::FirstName, 50))
                    .col(string_len(Employee::LastName, 50))
                    .col(string_len(Employee::Email, 255).unique_key())
                    .col(string_len_null(Employee::Phone, 20))
                    .col(date(Employee::HireDate))
                    .col(big_integer(Employee::SalaryCents))
                    .col(string_len_null(Employee::JobTitle, 100))
                    .col(integer(Employee::DepartmentId))
                    // full-time columns
                    .col(big_integer_null(Employee::AnnualBonusCents))
                    .col(integer_null(Employee::StockOptions))
                    .col(boolean_null(Employee::HealthInsurance))
                    .col(boolean_null(Employee::RetirementPlan))
                    // part-time columns
                    .col(integer_null(Employee::HoursPerWeek))
                    .col(boolean_null(Employee::FlexibleSchedule))
                    .col(boolean_null(Employee::RemoteWork))
                    .col(date_null(Employee::ContractEndDate))
                    .col(timestamp_with_time_zone(Employee::CreatedAt))
                    .col(timestamp_with_time_zone(Employee::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_employee_department")
                            .from(Employee::Table, Employee::DepartmentId)
                            .to(Department::Table, Department::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Employee::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Employee {
    #[sea_orm(iden = "employees")]
    Table,
    Id,
    EmployeeType,
    FirstName,
    LastName,
    Email,
    Phone,
    HireDate,
    SalaryCents,
    JobTitle,
    DepartmentId,
    AnnualBonusCents,
    StockOptions,
    HealthInsurance,
    RetirementPlan,
    HoursPerWeek,
    FlexibleSchedule,
    RemoteWork,
    ContractEndDate,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Department {
    #[sea_orm(iden = "departments")]
    Table,
    Id,
}
