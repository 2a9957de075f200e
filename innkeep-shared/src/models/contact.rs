use uuid::Uuid;

#[derive(Debug, Clone, PartialEq)]
pub struct ContactInquiry {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
    pub received_at: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewContactInquiry {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
    pub received_at: String,
}

impl NewContactInquiry {
    pub fn into_inquiry(self, id: Uuid) -> ContactInquiry {
        ContactInquiry {
            id,
            name: self.name,
            email: self.email,
            phone: self.phone,
            message: self.message,
            received_at: self.received_at,
        }
    }
}
