use crate::models::job::AppliedStatus;

const NEW_JOB_TEMPLATE: &str = include_str!("../../templates/new_job.html");

/// The job form with its "Applied?" options filled in.
pub fn render_new_job_page() -> String {
    NEW_JOB_TEMPLATE.replace("{{applied_options}}", &applied_options())
}

fn applied_options() -> String {
    let mut html = String::from(r#"<option value="">Select</option>"#);
    for status in AppliedStatus::ALL {
        let cell = status.as_cell();
        html.push_str(&format!(
            r#"<option value="{cell}">{cell} {}</option>"#,
            status.label()
        ));
    }
    html
}
