use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Departments: name unique within a company
        manager
            .create_index(
                Index::create()
                    .name("uniq_department_company_name")
                    .table(Department::Table)
                    .col(Department::CompanyId)
                    .col(Department::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Employees: lookups by department and by variant
        manager
            .create_index(
                Index::create()
                    .name("idx_employee_department")
                    .table(Employee::Table)
                    .col(Employee::DepartmentId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_employee_type")
                    .table(Employee::Table)
                    .col(Employee::EmployeeType)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("uniq_department_company_name").table(Department::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_employee_department").table(Employee::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_employee_type").table(Employee::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Department {
    #[sea_orm(iden = "departments")]
    Table,
    CompanyId,
    Name,
}

#[derive(DeriveIden)]
enum Employee {
    #[sea_orm(iden = "employees")]
    Table,
    DepartmentId,
    EmployeeType,
}
