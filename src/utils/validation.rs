use validator::ValidateEmail;

use crate::error::{AppError, Result};

pub const CODE_LENGTH: usize = 6;

pub fn validate_email_address(email: &str) -> Result<()> {
    if !email.validate_email() {
        return Err(AppError::BadRequest("Invalid email address".to_string()));
    }

    Ok(())
}

pub fn validate_code_shape(code: &str) -> Result<()> {
    if code.len() != CODE_LENGTH {
        return Err(AppError::BadRequest(format!(
            "Verification code must be {} characters",
            CODE_LENGTH
        )));
    }

    Ok(())
}

pub const UNLOCK_KEY_LENGTH: usize = 6;

pub fn validate_unlock_key(key: &str) -> Result<()> {
    if key.len() != UNLOCK_KEY_LENGTH || !key.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(AppError::BadRequest(format!(
            "Unlock key must be {} letters or digits",
            UNLOCK_KEY_LENGTH
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use claims::{assert_err, assert_ok};
    use fake::Fake;
    use fake::faker::internet::en::SafeEmail;
    use quickcheck::Arbitrary;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::{validate_code_shape, validate_email_address};

    #[derive(Clone, Debug)]
    struct TestEmail(pub String);

    impl Arbitrary for TestEmail {
        fn arbitrary(g: &mut quickcheck::Gen) -> Self {
            let mut rng = StdRng::seed_from_u64(u64::arbitrary(g));
            Self(SafeEmail().fake_with_rng(&mut rng))
        }
    }

    #[quickcheck_macros::quickcheck]
    fn valid_emails_pass(email: TestEmail) -> bool {
        validate_email_address(&email.0).is_ok()
    }

    #[test]
    fn empty_email_rejected() {
        assert_err!(validate_email_address(""));
    }

    #[test]
    fn email_without_at_rejected() {
        assert_err!(validate_email_address("johnfoo.com"));
    }

    #[test]
    fn email_without_subject_rejected() {
        assert_err!(validate_email_address("@foo.com"));
    }

    #[test]
    fn six_digit_code_passes() {
        assert_ok!(validate_code_shape("042137"));
    }

    #[test]
    fn short_code_rejected() {
        assert_err!(validate_code_shape("1234"));
    }

    #[test]
    fn long_code_rejected() {
        assert_err!(validate_code_shape("1234567"));
    }

    #[test]
    fn unlock_key_accepts_six_alphanumerics() {
        assert_ok!(super::validate_unlock_key("RAINB7"));
    }

    #[test]
    fn unlock_key_rejects_punctuation_and_bad_length() {
        assert_err!(super::validate_unlock_key("RAIN-7"));
        assert_err!(super::validate_unlock_key("RAINBOW"));
    }
}
