use serde::{Deserialize, Serialize};

use crate::http::{Query, QueryParams};

/// A customer and/or vendor, either a company or a person.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<String>,
    #[serde(default)]
    pub version: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roles: Option<ContactRoles>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<Company>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub person: Option<Person>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub addresses: Option<ContactAddresses>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x_rechnung: Option<XRechnungContact>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_addresses: Option<EmailAddresses>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_numbers: Option<PhoneNumbers>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default)]
    pub archived: bool,
}

/// Presence of a role marks the contact as customer and/or vendor; the
/// provider assigns the numbers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactRoles {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer: Option<ContactRole>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor: Option<ContactRole>,
}

impl ContactRoles {
    pub fn customer() -> Self {
        Self {
            customer: Some(ContactRole::default()),
            vendor: None,
        }
    }

    pub fn vendor() -> Self {
        Self {
            customer: None,
            vendor: Some(ContactRole::default()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactRole {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vat_registration_id: Option<String>,
    #[serde(default)]
    pub allow_tax_free_invoices: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub contact_persons: Vec<ContactPerson>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salutation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    pub last_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactPerson {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salutation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    pub last_name: String,
    #[serde(default)]
    pub primary: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactAddresses {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub billing: Vec<ContactAddress>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub shipping: Vec<ContactAddress>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactAddress {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supplement: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    pub country_code: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct XRechnungContact {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buyer_reference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor_number_at_customer: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmailAddresses {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub business: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub office: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub private: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub other: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PhoneNumbers {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub business: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub office: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mobile: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub private: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fax: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub other: Vec<String>,
}

/// Input for `contacts().create`. The provider expects `version: 0` on
/// creation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactCreateRequest {
    #[serde(default)]
    pub version: i64,
    pub roles: ContactRoles,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<Company>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub person: Option<Person>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub addresses: Option<ContactAddresses>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x_rechnung: Option<XRechnungContact>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_addresses: Option<EmailAddresses>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_numbers: Option<PhoneNumbers>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactUpdateRequest {
    pub version: i64,
    pub roles: ContactRoles,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<Company>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub person: Option<Person>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub addresses: Option<ContactAddresses>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x_rechnung: Option<XRechnungContact>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_addresses: Option<EmailAddresses>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_numbers: Option<PhoneNumbers>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl From<Contact> for ContactUpdateRequest {
    fn from(contact: Contact) -> Self {
        Self {
            version: contact.version,
            roles: contact.roles.unwrap_or_default(),
            company: contact.company,
            person: contact.person,
            addresses: contact.addresses,
            x_rechnung: contact.x_rechnung,
            email_addresses: contact.email_addresses,
            phone_numbers: contact.phone_numbers,
            note: contact.note,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactFilter {
    pub email: Option<String>,
    pub name: Option<String>,
    pub number: Option<u32>,
    /// Only contacts with the customer role. `false` adds no parameter.
    pub customer: bool,
    pub vendor: bool,
}

impl QueryParams for ContactFilter {
    fn append_to(&self, query: &mut Query) {
        query.push_opt("email", self.email.as_deref());
        query.push_opt("name", self.name.as_deref());
        query.push_opt("number", self.number);
        if self.customer {
            query.push("customer", true);
        }
        if self.vendor {
            query.push("vendor", true);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn x_rechnung_uses_provider_field_name() {
        let contact = ContactCreateRequest {
            roles: ContactRoles::customer(),
            person: Some(Person {
                last_name: "Mustermann".to_string(),
                ..Person::default()
            }),
            x_rechnung: Some(XRechnungContact {
                buyer_reference: Some("04011000-1234512345-35".to_string()),
                vendor_number_at_customer: None,
            }),
            ..ContactCreateRequest::default()
        };
        let json = serde_json::to_value(&contact).unwrap();
        assert_eq!(json["version"], 0);
        assert_eq!(json["roles"], serde_json::json!({"customer": {}}));
        assert_eq!(json["xRechnung"]["buyerReference"], "04011000-1234512345-35");
        assert!(json.get("company").is_none());
    }

    #[test]
    fn role_filters_only_render_when_set() {
        let filter = ContactFilter {
            customer: true,
            vendor: false,
            ..ContactFilter::default()
        };
        assert_eq!(filter.to_query().encode(), "customer=true");
        assert!(ContactFilter::default().to_query().is_empty());
    }
}
