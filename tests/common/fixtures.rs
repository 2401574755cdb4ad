use capa_portal::Record;

/// A representative CAPA submission touching every section of the form.
pub fn sample_record(capa_no: &str) -> Record {
    Record::new()
        .with("DEPARTMENT", "Engineering")
        .with("AREA_SECTION", "Line 3 / Packing")
        .with("DATE_OF_INCIDENT", "2025-03-14")
        .with("CAPA_NO", capa_no)
        .with("WHAT", "Conveyor bearing seized")
        .with("WHERE", "Packing line 3")
        .with("WHEN", "Night shift")
        .with("EXTENT", "Line stopped, 40 pallets delayed")
        .with("TIME1", "10:30")
        .with("TIME2", "13:00")
        .with("B", "YES")
        .with("TEAM_NAME", "Line 3 response")
        .with("LEADER", "R. Sharma")
        .with("MEM1", "D. Okafor")
        .with("R1", "Maintenance")
        .with("C1", "555-0101")
        .with("ACTIONS", "Replaced bearing, cleaned housing")
        .with("TIME_FRAME", "Same shift")
        .with("RESPONSIBILITY", "Maintenance")
        .with("WHY1", "Bearing seized")
        .with("WHY2", "Lubrication missed")
        .with("M2", "YES")
        .with("CONCLUSION", "Lubrication schedule gap")
        .with("C_ACTIONS", "Add line 3 to weekly lubrication round")
        .with("RES1", "Maintenance planner")
        .with("T1", "2025-03-21")
        .with("P_ACTIONS", "Audit lubrication coverage for all lines")
        .with("RES2", "Maintenance manager")
        .with("T2", "2025-04-15")
        .with("PLAN", "Update PM checklist")
        .with("O2", "YES")
        .with("TRAINING_DETAILS", "Toolbox talk on PM checklist")
        .with("DATE_IMPLE", "2025-03-21")
        .with("EFFECTIVENESS_EVAL", "No repeat in 90 days")
        .with("INITIATOR", "A. Mensah")
        .with("REVIEWER", "K. Lindqvist")
        .with("HOD", "M. Tan")
}

/// A template exercising the identifier, text fields, and tick flags.
pub fn sample_template() -> &'static str {
    "CAPA REPORT {{CAPA_NO}}\n\
     Department: {{DEPARTMENT}}\n\
     Area: {{AREA_SECTION}}\n\
     Date: {{DATE_OF_INCIDENT}}\n\
     What: {{WHAT}}\n\
     Breakdown 2-4h: {{B}} | >=4h: {{A}}\n\
     Cause machine: {{M2}} | Cause man: {{M1}}\n\
     Modified SOP: {{O2}}\n"
}
