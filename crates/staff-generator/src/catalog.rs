//! Fixed reference tables used to build departments, positions, projects
//! and trainings.
//!
//! Positions are ordered by seniority: the leading entries are the ones a
//! seed plan reserves for managers.

/// (name, location, description)
pub const DEPARTMENTS: &[(&str, &str, &str)] = &[
    (
        "Engineering",
        "Beijing",
        "Product development and platform engineering",
    ),
    (
        "Human Resources",
        "Shanghai",
        "Recruiting, onboarding and employee relations",
    ),
    ("Finance", "Shanghai", "Accounting, budgeting and payroll"),
    (
        "Marketing",
        "Guangzhou",
        "Brand, campaigns and market research",
    ),
    ("Sales", "Shenzhen", "Enterprise and channel sales"),
    (
        "Operations",
        "Hangzhou",
        "Facilities, procurement and logistics",
    ),
    (
        "Customer Support",
        "Chengdu",
        "Customer success and technical support",
    ),
    ("Research", "Beijing", "Applied research and prototyping"),
    (
        "Legal",
        "Shanghai",
        "Contracts, compliance and intellectual property",
    ),
    (
        "Quality Assurance",
        "Wuhan",
        "Testing, release validation and audits",
    ),
    (
        "Product",
        "Hangzhou",
        "Product management and user research",
    ),
    (
        "IT Services",
        "Nanjing",
        "Internal infrastructure and helpdesk",
    ),
];

/// (name, level, description); level 1 is the most senior.
pub const POSITIONS: &[(&str, i32, &str)] = &[
    (
        "Department Director",
        1,
        "Owns the strategy and budget of a department",
    ),
    (
        "Department Manager",
        2,
        "Runs day-to-day operations of a department",
    ),
    (
        "Project Manager",
        3,
        "Plans and delivers cross-functional projects",
    ),
    (
        "Senior Software Engineer",
        4,
        "Designs and builds complex systems",
    ),
    (
        "Software Engineer",
        5,
        "Implements and maintains product features",
    ),
    (
        "Junior Software Engineer",
        6,
        "Develops features under guidance",
    ),
    ("QA Engineer", 5, "Designs and runs test plans"),
    (
        "Data Analyst",
        5,
        "Builds reports and analyses business data",
    ),
    ("Accountant", 5, "Maintains ledgers and prepares statements"),
    (
        "HR Specialist",
        5,
        "Handles recruiting and employee records",
    ),
    (
        "Sales Representative",
        5,
        "Manages customer accounts and pipeline",
    ),
    (
        "Marketing Specialist",
        5,
        "Plans and runs marketing campaigns",
    ),
    ("Support Engineer", 5, "Resolves customer technical issues"),
    (
        "Operations Coordinator",
        6,
        "Coordinates facilities and logistics",
    ),
    (
        "Administrative Assistant",
        7,
        "Provides office and scheduling support",
    ),
    ("Intern", 8, "Temporary trainee position"),
];

pub const PROJECT_PREFIXES: &[&str] = &[
    "Atlas", "Beacon", "Cobalt", "Delta", "Ember", "Falcon", "Granite", "Horizon", "Iris",
    "Juniper", "Keystone", "Lumen", "Meridian", "Nimbus", "Orion", "Pioneer",
];

pub const PROJECT_SUFFIXES: &[&str] = &[
    "Platform Upgrade",
    "Data Migration",
    "Mobile App",
    "CRM Rollout",
    "Payroll Automation",
    "Analytics Dashboard",
    "Security Audit",
    "Cloud Migration",
    "Customer Portal",
    "Supply Chain Revamp",
];

pub const PROJECT_ROLES: &[&str] = &[
    "Project Lead",
    "Developer",
    "Tester",
    "Analyst",
    "Designer",
    "Consultant",
    "Coordinator",
];

/// (name, description)
pub const TRAINING_TOPICS: &[(&str, &str)] = &[
    (
        "New Employee Orientation",
        "Company policies, culture and tooling",
    ),
    (
        "Leadership Fundamentals",
        "Coaching, feedback and delegation",
    ),
    (
        "Information Security Awareness",
        "Phishing, passwords and data handling",
    ),
    (
        "Effective Communication",
        "Writing, presenting and meetings",
    ),
    (
        "Project Management Essentials",
        "Scope, schedule and risk management",
    ),
    (
        "Advanced SQL",
        "Query tuning, window functions and indexing",
    ),
    ("Workplace Safety", "Emergency procedures and ergonomics"),
    (
        "Customer Service Excellence",
        "Handling escalations and feedback",
    ),
    ("Financial Literacy", "Budgets, forecasts and cost control"),
    ("Agile Practices", "Scrum, kanban and continuous delivery"),
];

pub const TRAINERS: &[&str] = &[
    "Internal Academy",
    "External Consultant",
    "HR Department",
    "Engineering Guild",
    "Partner University",
];

pub const TRAINING_LOCATIONS: &[&str] = &[
    "Conference Room A",
    "Conference Room B",
    "Training Center",
    "Online",
    "Headquarters Auditorium",
];

/// Pick `table[index % len]`, appending a cycle number once the table wraps
/// so repeated names stay distinct.
pub fn cycled_name(table_name: &str, index: usize, table_len: usize) -> String {
    let cycle = index / table_len.max(1);
    if cycle == 0 {
        table_name.to_string()
    } else {
        format!("{} {}", table_name, cycle + 1)
    }
}
