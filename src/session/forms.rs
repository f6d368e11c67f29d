use crate::api::auth::Registration;
use crate::core::form::{self, FormError, PASSWORD_MIN};
use crate::core::user::Role;

#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<(String, String), FormError> {
        let email = form::require(&self.email, "email")?;
        if !form::is_valid_email(email) {
            return Err(FormError::InvalidEmail);
        }
        if self.password.is_empty() {
            return Err(FormError::Required { field: "password" });
        }
        Ok((email.to_string(), self.password.clone()))
    }
}

#[derive(Debug, Clone)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
    /// Comma separated.
    pub skills: String,
    pub bio: String,
}

impl Default for RegisterForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            password: String::new(),
            role: Role::Student,
            skills: String::new(),
            bio: String::new(),
        }
    }
}

impl RegisterForm {
    pub fn to_request(&self) -> Result<Registration, FormError> {
        let name = form::require(&self.name, "name")?;
        let email = form::require(&self.email, "email")?;
        if !form::is_valid_email(email) {
            return Err(FormError::InvalidEmail);
        }
        if self.password.chars().count() < PASSWORD_MIN {
            return Err(FormError::PasswordTooShort);
        }
        let skills = form::split_skills(&self.skills);
        form::check_skills(&skills)?;

        let role = match self.role {
            Role::Admin => {
                log::info!("Admin cannot be self-assigned, registering as mentor");
                Role::Mentor
            }
            other => other,
        };
        let bio = self.bio.trim();

        Ok(Registration {
            email: email.to_string(),
            password: self.password.clone(),
            name: name.to_string(),
            role,
            skills,
            bio: (!bio.is_empty()).then(|| bio.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> RegisterForm {
        RegisterForm {
            name: "Ada Lovelace".into(),
            email: "ada@uni.edu".into(),
            password: "engine-1843".into(),
            role: Role::Mentor,
            skills: "Math, Engines".into(),
            bio: String::new(),
        }
    }

    #[test]
    fn valid_registration() {
        let req = filled().to_request().unwrap();
        assert_eq!(req.role, Role::Mentor);
        assert_eq!(req.skills, vec!["Math".to_string(), "Engines".to_string()]);
        assert_eq!(req.bio, None);
    }

    #[test]
    fn admin_registers_as_mentor() {
        let form = RegisterForm {
            role: Role::Admin,
            ..filled()
        };
        assert_eq!(form.to_request().unwrap().role, Role::Mentor);
    }

    #[test]
    fn registration_errors() {
        let bad_email = RegisterForm {
            email: "ada@uni".into(),
            ..filled()
        };
        assert_eq!(bad_email.to_request(), Err(FormError::InvalidEmail));

        let short = RegisterForm {
            password: "1234567".into(),
            ..filled()
        };
        assert_eq!(short.to_request(), Err(FormError::PasswordTooShort));

        let nameless = RegisterForm {
            name: "  ".into(),
            ..filled()
        };
        assert_eq!(
            nameless.to_request(),
            Err(FormError::Required { field: "name" })
        );
    }

    #[test]
    fn login_requires_both_fields() {
        let form = LoginForm {
            email: "ada@uni.edu".into(),
            password: String::new(),
        };
        assert_eq!(
            form.validate(),
            Err(FormError::Required { field: "password" })
        );
        let form = LoginForm {
            email: " ada@uni.edu ".into(),
            password: "x".into(),
        };
        assert_eq!(form.validate().unwrap().0, "ada@uni.edu");
    }
}
