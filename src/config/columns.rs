//! Recognized column names of the employee table.

/// Employee display name.
pub const NAME: &str = "Name";
/// Numeric employee identifier.
pub const ID: &str = "ID";
/// Years of experience.
pub const EXPERIENCE: &str = "Experience";
/// Highest education.
pub const EDUCATION: &str = "Education";
/// Job role, used for market lookups.
pub const JOB_ROLE: &str = "Job Role";
/// Department name.
pub const DEPARTMENT: &str = "Department";
/// Work location, used for market lookups.
pub const LOCATION: &str = "Location";
/// Free-form skills list.
pub const SKILLS: &str = "Skills";
/// Certifications held.
pub const CERTIFICATIONS: &str = "Certifications";
/// Salary before the current role.
pub const PREVIOUS_SALARY: &str = "Previous Salary";
/// Budget the department allots for the position.
pub const DEPARTMENT_BUDGET: &str = "Departmental Budget";
/// Current cost to company.
pub const CURRENT_CTC: &str = "Current CTC";
/// Performance rating, nominally 1 to 5.
pub const PERFORMANCE_RATING: &str = "Performance Rating";
/// Internal or external candidate.
pub const INTERNAL_EXTERNAL: &str = "Internal/External";
/// Market benchmark cost to company.
pub const MARKET_CTC: &str = "Market CTC";
/// Company size bracket.
pub const COMPANY_SIZE: &str = "Company Size";
/// Business unit.
pub const BUSINESS_UNIT: &str = "Business Unit";
/// Number of direct reports.
pub const TEAM_SIZE: &str = "Team Size";
/// Employee age.
pub const AGE: &str = "Age";

/// Optional promotion flag. Not part of the recognized schema; absent means
/// not promoted.
pub const PROMOTION: &str = "Promotion";

/// The value used to fill missing categorical and free-text cells.
pub const UNKNOWN: &str = "Unknown";

/// The columns every normalized table carries, in schema order.
pub const RECOGNIZED: [&str; 19] = [
    NAME,
    ID,
    EXPERIENCE,
    EDUCATION,
    JOB_ROLE,
    DEPARTMENT,
    LOCATION,
    SKILLS,
    CERTIFICATIONS,
    PREVIOUS_SALARY,
    DEPARTMENT_BUDGET,
    CURRENT_CTC,
    PERFORMANCE_RATING,
    INTERNAL_EXTERNAL,
    MARKET_CTC,
    COMPANY_SIZE,
    BUSINESS_UNIT,
    TEAM_SIZE,
    AGE,
];

/// Recognized columns that must carry a numeric default.
pub const NUMERIC: [&str; 8] = [
    EXPERIENCE,
    PREVIOUS_SALARY,
    DEPARTMENT_BUDGET,
    CURRENT_CTC,
    PERFORMANCE_RATING,
    MARKET_CTC,
    TEAM_SIZE,
    AGE,
];
