use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub id: &'static str,
    pub name: &'static str,
    /// welcome | reminder | payment | promotion | general
    pub category: &'static str,
    /// approved | pending
    pub status: &'static str,
    pub language: &'static str,
    /// Body with `{{placeholders}}`
    pub content: &'static str,
    pub variables: &'static [&'static str],
}

pub static TEMPLATES: &[Template] = &[
    Template {
        id: "welcome_member",
        name: "Welcome Message",
        category: "welcome",
        status: "approved",
        language: "en",
        content: "Hi {{name}}, welcome to {{gym_name}}! Your membership number is {{membership_number}}. See you at the gym!",
        variables: &["name", "gym_name", "membership_number"],
    },
    Template {
        id: "expiry_reminder",
        name: "Membership Expiry Reminder",
        category: "reminder",
        status: "approved",
        language: "en",
        content: "Hi {{name}}, your {{plan_name}} membership at {{gym_name}} expires on {{end_date}}. Renew now to keep training without a break.",
        variables: &["name", "plan_name", "gym_name", "end_date"],
    },
    Template {
        id: "expired_notice",
        name: "Membership Expired",
        category: "reminder",
        status: "approved",
        language: "en",
        content: "Hi {{name}}, your membership at {{gym_name}} expired on {{end_date}}. Visit the front desk or reply to this message to renew.",
        variables: &["name", "gym_name", "end_date"],
    },
    Template {
        id: "payment_receipt",
        name: "Payment Receipt",
        category: "payment",
        status: "approved",
        language: "en",
        content: "Hi {{name}}, we received your payment of {{amount}} on {{payment_date}}. Your membership is valid until {{end_date}}. Thank you!",
        variables: &["name", "amount", "payment_date", "end_date"],
    },
    Template {
        id: "payment_due",
        name: "Payment Due",
        category: "payment",
        status: "pending",
        language: "en",
        content: "Hi {{name}}, a payment of {{amount}} for your {{plan_name}} membership is due on {{due_date}}.",
        variables: &["name", "amount", "plan_name", "due_date"],
    },
    Template {
        id: "festive_offer",
        name: "Festive Offer",
        category: "promotion",
        status: "pending",
        language: "en",
        content: "{{gym_name}} festive offer: get {{discount}} off on all plans until {{offer_end}}. Reply YES to know more.",
        variables: &["gym_name", "discount", "offer_end"],
    },
    Template {
        id: "missed_workouts",
        name: "We Miss You",
        category: "general",
        status: "approved",
        language: "en",
        content: "Hi {{name}}, we haven't seen you at {{gym_name}} for {{days}} days. Your trainer is ready when you are!",
        variables: &["name", "gym_name", "days"],
    },
];
