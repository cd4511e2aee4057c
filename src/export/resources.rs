use super::calendars::build_calendar;
use super::encoding::format_float;
use super::xml::XmlElement;
use super::{ExportResult, MspXmlExporter};
use crate::resource::Resource;
use tracing::debug;

impl MspXmlExporter<'_> {
    /// Resource block. Each resource also gets its own calendar appended to
    /// `calendars`.
    pub(super) fn resources_element(
        &mut self,
        calendars: &mut XmlElement,
    ) -> ExportResult<XmlElement> {
        let mut resources = XmlElement::new("Resources");
        let exported = self.lists.resources.clone();
        for (uid, resource) in exported.into_iter().enumerate() {
            resources.push(self.resource_element(uid, resource, calendars)?);
        }
        debug!(count = resources.children().len(), "resources written");
        Ok(resources)
    }

    fn resource_element(
        &mut self,
        uid: usize,
        resource: &Resource,
        calendars: &mut XmlElement,
    ) -> ExportResult<XmlElement> {
        let data = resource.scenario(self.scenario)?;
        // Project uses hourly rates
        let rate = format_float(data.rate / self.model.metadata().daily_working_hours);

        let mut r = XmlElement::new("Resource");
        r.push_text("UID", uid.to_string());
        r.push_text("Type", "1");
        r.push_text("Name", resource.name.as_str());
        r.push_text("Initials", resource.id.as_str());
        r.push_text("StandardRate", rate.as_str());
        r.push_text("OvertimeRate", rate);
        r.push_text("MaxUnits", format_float(data.efficiency));
        if let Some(email) = &resource.email {
            r.push_text("EmailAddress", email.as_str());
        }
        if let Some(group) = self.model.parent_resource(resource)? {
            r.push_text("Group", group.name.as_str());
        }

        let calendar_name = format!("Calendar {}", resource.name);
        let calendar_uid = build_calendar(
            &mut self.calendars,
            calendars,
            &calendar_name,
            &data.working_hours,
        );
        r.push_text("CalendarUID", calendar_uid.to_string());

        Ok(r)
    }
}
